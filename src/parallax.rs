pub mod cursor;
pub mod layer;
pub mod pointer;
pub mod reveal;
pub mod scroll;
