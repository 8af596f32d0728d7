use crate::foundation::core::Timestamp;

/// Host events forwarded to the scene.
///
/// These fire from the host's event dispatch, never from inside a frame
/// callback; they only write fields that the next tick reads.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum InputEvent {
    /// The viewport changed size or moved across displays.
    Resized {
        /// New viewport width in css pixels.
        width: f64,
        /// New viewport height in css pixels.
        height: f64,
        /// New device pixel ratio (clamped on ingest).
        dpr: f64,
    },
    /// The pointer moved; coordinates in viewport css pixels.
    PointerMoved {
        /// Pointer x.
        x: f64,
        /// Pointer y.
        y: f64,
    },
    /// The page regained focus; stamped by the host at dispatch time.
    FocusRegained {
        /// Host clock reading inside the focus handler.
        at: Timestamp,
    },
}
