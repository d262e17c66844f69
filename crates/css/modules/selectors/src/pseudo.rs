//! Pseudo-class state bits.

bitflags::bitflags! {
    /// Interaction state of an element, tested by pseudo-class selectors.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PseudoStates: u32 {
        const ACTIVE   = 1 << 0;
        const HOVER    = 1 << 1;
        const CHECKED  = 1 << 3;
        const DISABLED = 1 << 5;
        const FOCUS    = 1 << 6;
        const ROOT     = 1 << 7;
    }
}

/// Pseudo-state bits observed while matching one compound against one element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PseudoMatchInfo {
    /// States whose change could make a failed match succeed.
    pub trigger: PseudoStates,
    /// States a successful match depends on.
    pub dependency: PseudoStates,
}

/// Map a pseudo-class name to its state bit. The flag is true for negated
/// pseudo-classes, which require the bit to be absent.
pub fn pseudo_state_for(name: &str) -> Option<(PseudoStates, bool)> {
    let state = match name.to_ascii_lowercase().as_str() {
        "active" => (PseudoStates::ACTIVE, false),
        "hover" => (PseudoStates::HOVER, false),
        "checked" => (PseudoStates::CHECKED, false),
        "disabled" => (PseudoStates::DISABLED, false),
        "enabled" => (PseudoStates::DISABLED, true),
        "focus" => (PseudoStates::FOCUS, false),
        "root" => (PseudoStates::ROOT, false),
        _ => return None,
    };
    Some(state)
}
