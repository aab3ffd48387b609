//! かな -> ローマ字 のフラッシュカードクイズ
//!
//! 中心になるのは [`kana`] (文字一覧と対応表) と [`word`] (お題の生成とローマ字変換)。
//! [`tui`] と [`web`] はそれを呼び出すだけの外側。

pub mod config;
pub mod kana;
pub mod quiz;
pub mod tui;
pub mod web;
pub mod word;

pub use kana::{CharacterSet, Family, KanaError};
pub use word::{Word, WordGenerator, new_word, to_romaji};
