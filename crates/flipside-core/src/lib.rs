pub mod body;
pub mod director;
pub mod input;
pub mod scene;
pub mod signal;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use glam::Vec2;

    use crate::body::{BodySnapshot, CollectibleId, ContactFlags};
    use crate::input::{InputState, Key};
    use crate::scene::{Frame, Scene, SceneTransition};
    use crate::signal::Outbox;

    /// A body resting mid-level with the given contacts and horizontal velocity.
    pub fn body(contacts: ContactFlags, velocity_x: f32) -> BodySnapshot {
        BodySnapshot::new(Vec2::new(300.0, 400.0), contacts)
            .with_velocity(Vec2::new(velocity_x, 0.0))
    }

    /// Input where `previous` was held last tick and `now` is held this tick.
    pub fn input_after(previous: &[Key], now: &[Key]) -> InputState {
        let mut input = InputState::new();
        input.sample(previous.iter().copied());
        input.sample(now.iter().copied());
        input
    }

    /// Input with `keys` freshly pressed this tick.
    pub fn pressed(keys: &[Key]) -> InputState {
        input_after(&[], keys)
    }

    /// Run a single scene tick, returning the transition and everything emitted.
    pub fn tick_scene(
        scene: &mut dyn Scene,
        input: &InputState,
        body: &BodySnapshot,
        overlaps: &[CollectibleId],
    ) -> (Option<SceneTransition>, Outbox) {
        let frame = Frame {
            input,
            body,
            overlaps,
        };
        let mut out = Outbox::new();
        let transition = scene.tick(&frame, &mut out);
        (transition, out)
    }

    /// Run `n` idle ticks with a fixed body, returning the first transition.
    pub fn run_idle_ticks(
        scene: &mut dyn Scene,
        body: &BodySnapshot,
        n: usize,
    ) -> Option<SceneTransition> {
        let input = InputState::new();
        (0..n).find_map(|_| tick_scene(scene, &input, body, &[]).0)
    }
}
