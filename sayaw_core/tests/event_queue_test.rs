use glam::Vec3;
use sayaw_core::input::events::GameEvent;
use sayaw_core::input::EventQueue;
use std::thread;
use wall_schema::{BodyPart, WallId, WallSpec};

#[test]
fn test_colliders_on_other_threads_reach_the_queue() {
    let queue = EventQueue::new();
    let left = queue.producer();
    let spawner = queue.producer();

    let collider = thread::spawn(move || {
        left.strike(WallId(1), BodyPart::LeftArm, Vec3::new(-0.5, 1.0, 0.0));
    });
    collider.join().unwrap();

    let timer = thread::spawn(move || spawner.missed(WallId(2)));
    timer.join().unwrap();

    assert_eq!(queue.len(), 2);
    let events: Vec<GameEvent> = queue.drain().collect();
    assert_eq!(
        events,
        vec![
            GameEvent::Strike {
                wall: WallId(1),
                body_part: BodyPart::LeftArm,
                position: Vec3::new(-0.5, 1.0, 0.0),
            },
            GameEvent::Missed { wall: WallId(2) },
        ]
    );
    assert!(queue.is_empty());
}

#[test]
fn test_drain_keeps_arrival_order() {
    let queue = EventQueue::new();
    let producer = queue.producer();

    producer.spawn(WallSpec::new(WallId(10), vec![]));
    queue.push(GameEvent::Missed { wall: WallId(10) });
    producer.missed(WallId(11));

    let walls: Vec<WallId> = queue
        .drain()
        .map(|event| match event {
            GameEvent::Spawn(wall) => wall.id,
            GameEvent::Strike { wall, .. } | GameEvent::Missed { wall } => wall,
        })
        .collect();
    assert_eq!(walls, vec![WallId(10), WallId(10), WallId(11)]);
    assert_eq!(queue.drain().count(), 0);
}

#[test]
fn test_producer_outliving_queue_is_harmless() {
    let queue = EventQueue::new();
    let producer = queue.producer();
    drop(queue);

    producer.strike(WallId(1), BodyPart::RightArm, Vec3::ZERO);
}
