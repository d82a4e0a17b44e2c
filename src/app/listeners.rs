//! External listeners for player events.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Events forwarded to embedders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    Play,
    Pause,
}

impl fmt::Display for PlayerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => write!(f, "play"),
            Self::Pause => write!(f, "pause"),
        }
    }
}

impl FromStr for PlayerEvent {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "play" => Ok(Self::Play),
            "pause" => Ok(Self::Pause),
            other => Err(format!("Unknown player event: {other}")),
        }
    }
}

type Handler = Box<dyn FnMut()>;

/// At most one handler per event; registering again replaces it.
#[derive(Default)]
pub struct ListenerRegistry {
    handlers: HashMap<PlayerEvent, Handler>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&mut self, event: PlayerEvent, handler: impl FnMut() + 'static) {
        self.handlers.insert(event, Box::new(handler));
    }

    /// Returns true if a handler was removed.
    pub fn unlisten(&mut self, event: PlayerEvent) -> bool {
        self.handlers.remove(&event).is_some()
    }

    /// Call the handler for `event`, if any. Returns whether one ran.
    pub fn emit(&mut self, event: PlayerEvent) -> bool {
        match self.handlers.get_mut(&event) {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn names_round_trip() {
        assert_eq!("play".parse::<PlayerEvent>(), Ok(PlayerEvent::Play));
        assert_eq!(PlayerEvent::Pause.to_string(), "pause");
        assert!("seek".parse::<PlayerEvent>().is_err());
    }

    #[test]
    fn missing_handler_is_a_noop() {
        let mut registry = ListenerRegistry::new();
        assert!(!registry.emit(PlayerEvent::Play));
    }

    #[test]
    fn later_registration_overwrites() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut registry = ListenerRegistry::new();

        let counter = first.clone();
        registry.listen(PlayerEvent::Pause, move || counter.set(counter.get() + 1));
        let counter = second.clone();
        registry.listen(PlayerEvent::Pause, move || counter.set(counter.get() + 1));

        assert!(registry.emit(PlayerEvent::Pause));
        assert_eq!((first.get(), second.get()), (0, 1));

        assert!(registry.unlisten(PlayerEvent::Pause));
        assert!(!registry.emit(PlayerEvent::Pause));
    }
}
