pub mod events;

use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::Vec3;
use wall_schema::{BodyPart, WallId, WallSpec};

use self::events::GameEvent;

/// Spawner and collider events waiting for the session to pump them.
///
/// Producers may sit on any thread; the session drains on the frame thread.
pub struct EventQueue {
    producer: EventProducer,
    receiver: Receiver<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            producer: EventProducer { sender },
            receiver,
        }
    }

    pub fn push(&self, event: GameEvent) {
        self.producer.send(event);
    }

    /// Everything queued so far, in arrival order. Never blocks.
    pub fn drain(&self) -> impl Iterator<Item = GameEvent> + '_ {
        self.receiver.try_iter()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Handle for a spawner or a body-part collider.
    pub fn producer(&self) -> EventProducer {
        self.producer.clone()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Push side of an [`EventQueue`]. Events sent after the queue is dropped are discarded.
#[derive(Debug, Clone)]
pub struct EventProducer {
    sender: Sender<GameEvent>,
}

impl EventProducer {
    pub fn spawn(&self, wall: WallSpec) {
        self.send(GameEvent::Spawn(wall));
    }

    pub fn strike(&self, wall: WallId, body_part: BodyPart, position: Vec3) {
        self.send(GameEvent::Strike {
            wall,
            body_part,
            position,
        });
    }

    pub fn missed(&self, wall: WallId) {
        self.send(GameEvent::Missed { wall });
    }

    fn send(&self, event: GameEvent) {
        let _ = self.sender.send(event);
    }
}
