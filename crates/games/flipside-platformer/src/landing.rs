use flipside_core::body::ContactFlags;
use flipside_core::signal::{Outbox, Sound};

use crate::player::PlayerState;

/// Play the landing sound once on the first floor contact after falling.
/// Returns whether it fired.
pub fn detect_landing(contacts: ContactFlags, player: &mut PlayerState, out: &mut Outbox) -> bool {
    if contacts.blocked_down && player.is_falling {
        out.sound(Sound::Land);
        player.is_falling = false;
        true
    } else {
        false
    }
}
