//! Textual encodings: the game-description codec lives here.

pub mod desc;
