use crate::scene::{Frame, Scene, SceneData, SceneId, SceneTransition};
use crate::signal::{Outbox, Signal};

/// Builds a fresh scene instance for an id. Every call must return new
/// state; scenes never carry anything over from a previous run.
pub trait SceneFactory {
    fn build(&self, id: SceneId) -> Box<dyn Scene>;
}

/// Owns the active scene and performs handoffs between scenes.
pub struct SceneDirector<F: SceneFactory> {
    factory: F,
    active: Box<dyn Scene>,
    transitions: u32,
}

impl<F: SceneFactory> SceneDirector<F> {
    /// Build and enter the first scene.
    pub fn start(factory: F, first: SceneId, data: SceneData, out: &mut Outbox) -> Self {
        let active = enter(&factory, first, data, out);
        tracing::info!(scene = %first, "Scene started");
        Self {
            factory,
            active,
            transitions: 0,
        }
    }

    /// Tick the active scene. If it requests a transition, the old scene is
    /// exited and replaced before this returns.
    pub fn tick(&mut self, frame: &Frame<'_>, out: &mut Outbox) -> Option<SceneTransition> {
        let transition = self.active.tick(frame, out)?;
        self.switch_to(transition, out);
        Some(transition)
    }

    fn switch_to(&mut self, transition: SceneTransition, out: &mut Outbox) {
        let from = self.active.id();
        self.active.on_exit(out);
        out.signal(Signal::SceneChange {
            to: transition.to,
            data: transition.data,
        });
        self.active = enter(&self.factory, transition.to, transition.data, out);
        self.transitions += 1;
        tracing::info!(
            from = %from,
            to = %transition.to,
            data = ?transition.data,
            "Scene transition"
        );
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn active(&self) -> &dyn Scene {
        self.active.as_ref()
    }

    pub fn active_id(&self) -> SceneId {
        self.active.id()
    }

    /// Number of handoffs since start.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }
}

fn enter<F: SceneFactory>(
    factory: &F,
    id: SceneId,
    data: SceneData,
    out: &mut Outbox,
) -> Box<dyn Scene> {
    let mut scene = factory.build(id);
    scene.init(data);
    scene.on_enter(out);
    scene
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::body::BodySnapshot;
    use crate::input::{InputState, Key};

    /// Scene that leaves on Confirm and records lifecycle calls.
    struct Recorder {
        id: SceneId,
        log: Rc<RefCell<Vec<String>>>,
        ticks: u32,
    }

    impl Scene for Recorder {
        fn id(&self) -> SceneId {
            self.id
        }

        fn init(&mut self, data: SceneData) {
            self.log.borrow_mut().push(format!("init {} {data:?}", self.id));
        }

        fn on_enter(&mut self, _out: &mut Outbox) {
            self.log.borrow_mut().push(format!("enter {}", self.id));
        }

        fn tick(&mut self, frame: &Frame<'_>, _out: &mut Outbox) -> Option<SceneTransition> {
            self.ticks += 1;
            frame
                .input
                .is_key_just_pressed(Key::Confirm)
                .then_some(SceneTransition {
                    to: match self.id {
                        SceneId::Gameplay => SceneId::GameOver,
                        SceneId::GameOver => SceneId::Gameplay,
                    },
                    data: SceneData::Outcome { died: true },
                })
        }

        fn on_exit(&mut self, _out: &mut Outbox) {
            self.log.borrow_mut().push(format!("exit {}", self.id));
        }

        fn serialize_state(&self) -> serde_json::Value {
            serde_json::json!({ "ticks": self.ticks })
        }
    }

    struct RecordingFactory {
        log: Rc<RefCell<Vec<String>>>,
    }

    impl SceneFactory for RecordingFactory {
        fn build(&self, id: SceneId) -> Box<dyn Scene> {
            Box::new(Recorder {
                id,
                log: Rc::clone(&self.log),
                ticks: 0,
            })
        }
    }

    fn tick_with(director: &mut SceneDirector<RecordingFactory>, keys: &[Key]) -> Outbox {
        let mut input = InputState::new();
        input.sample(keys.iter().copied());
        let body = BodySnapshot::default();
        let frame = Frame {
            input: &input,
            body: &body,
            overlaps: &[],
        };
        let mut out = Outbox::new();
        director.tick(&frame, &mut out);
        out
    }

    #[test]
    fn start_inits_then_enters() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut out = Outbox::new();
        let director = SceneDirector::start(
            RecordingFactory {
                log: Rc::clone(&log),
            },
            SceneId::Gameplay,
            SceneData::None,
            &mut out,
        );
        assert_eq!(director.active_id(), SceneId::Gameplay);
        assert_eq!(*log.borrow(), vec!["init gameplay None", "enter gameplay"]);
    }

    #[test]
    fn transition_exits_old_and_enters_fresh_scene() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut out = Outbox::new();
        let mut director = SceneDirector::start(
            RecordingFactory {
                log: Rc::clone(&log),
            },
            SceneId::Gameplay,
            SceneData::None,
            &mut out,
        );

        tick_with(&mut director, &[]);
        tick_with(&mut director, &[]);
        assert_eq!(director.active().serialize_state()["ticks"], 2);

        let out = tick_with(&mut director, &[Key::Confirm]);
        assert_eq!(director.active_id(), SceneId::GameOver);
        assert_eq!(director.transitions(), 1);
        assert!(out.signals.contains(&Signal::SceneChange {
            to: SceneId::GameOver,
            data: SceneData::Outcome { died: true },
        }));
        // Fresh instance: no ticks carried over
        assert_eq!(director.active().serialize_state()["ticks"], 0);
        assert_eq!(
            log.borrow()[2..],
            [
                "exit gameplay",
                "init game_over Outcome { died: true }",
                "enter game_over",
            ]
        );
    }
}
