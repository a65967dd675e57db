//! Small enum codes shared with JavaScript.
//!
//! Enums cross the boundary as `u8` so the host can keep them in plain
//! numeric fields. Unknown codes fall back to a safe default rather than
//! failing.

use retouch_core::{AspectConstraint, FlipAxis, ToolMode};
use wasm_bindgen::prelude::*;

/// Convert a u8 aspect code to the core AspectConstraint enum.
///
/// Values:
/// - 0 = Custom
/// - 1..=14 = the fixed constraints in menu order (see `available_aspects`)
///
/// Any other value defaults to Custom.
pub(crate) fn aspect_from_u8(value: u8) -> AspectConstraint {
    match value {
        0 => AspectConstraint::Custom,
        n => AspectConstraint::ALL
            .get(usize::from(n) - 1)
            .copied()
            .unwrap_or(AspectConstraint::Custom),
    }
}

/// Inverse of [`aspect_from_u8`].
pub(crate) fn aspect_to_u8(aspect: AspectConstraint) -> u8 {
    AspectConstraint::ALL
        .iter()
        .position(|&a| a == aspect)
        .map_or(0, |i| (i + 1) as u8)
}

/// 0 = Horizontal, anything else = Vertical.
pub(crate) fn flip_axis_from_u8(value: u8) -> FlipAxis {
    match value {
        0 => FlipAxis::Horizontal,
        _ => FlipAxis::Vertical,
    }
}

/// 1 = Erase, anything else = Draw.
pub(crate) fn tool_mode_from_u8(value: u8) -> ToolMode {
    match value {
        1 => ToolMode::Erase,
        _ => ToolMode::Draw,
    }
}

pub(crate) fn tool_mode_to_u8(mode: ToolMode) -> u8 {
    match mode {
        ToolMode::Draw => 0,
        ToolMode::Erase => 1,
    }
}

fn aspect_labels() -> Vec<String> {
    AspectConstraint::ALL.iter().map(|a| a.to_string()).collect()
}

/// Menu labels for the fixed aspect constraints.
///
/// Index `i` of the returned array is aspect code `i + 1`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const labels = available_aspects(); // ["Original", "Square", "2:3", ...]
/// session.set_aspect(labels.indexOf("16:9") + 1);
/// ```
#[wasm_bindgen]
pub fn available_aspects() -> js_sys::Array {
    aspect_labels().into_iter().map(JsValue::from).collect()
}

/// Label for one aspect code.
#[wasm_bindgen]
pub fn aspect_label(code: u8) -> String {
    aspect_from_u8(code).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_from_u8() {
        assert_eq!(aspect_from_u8(0), AspectConstraint::Custom);
        assert_eq!(aspect_from_u8(1), AspectConstraint::Original);
        assert_eq!(aspect_from_u8(2), AspectConstraint::Square);
        assert_eq!(aspect_from_u8(14), AspectConstraint::SixteenNine);
        // Unknown values default to Custom
        assert_eq!(aspect_from_u8(15), AspectConstraint::Custom);
        assert_eq!(aspect_from_u8(255), AspectConstraint::Custom);
    }

    #[test]
    fn test_aspect_codes_are_stable() {
        for code in 0..=14u8 {
            assert_eq!(aspect_to_u8(aspect_from_u8(code)), code);
        }
    }

    #[test]
    fn test_labels_match_codes() {
        let labels = aspect_labels();
        assert_eq!(labels.len(), 14);
        assert_eq!(labels[13], "16:9");
        assert_eq!(aspect_label(14), "16:9");
        assert_eq!(aspect_label(0), "Custom");
    }

    #[test]
    fn test_flip_and_tool_codes() {
        assert_eq!(flip_axis_from_u8(0), FlipAxis::Horizontal);
        assert_eq!(flip_axis_from_u8(1), FlipAxis::Vertical);
        assert_eq!(tool_mode_from_u8(1), ToolMode::Erase);
        assert_eq!(tool_mode_from_u8(7), ToolMode::Draw);
        assert_eq!(tool_mode_to_u8(ToolMode::Erase), 1);
    }
}
