pub mod completion_detector;
pub mod framing;

pub use completion_detector::{
    CompletionDetector, CompletionReason, IdleDeadlineDetector, NextFrame,
};
pub use framing::{encode_frame, send_frame_and_finish, MAX_FRAME_PAYLOAD};
