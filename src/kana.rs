// ============================================
// src/kana.rs
// かな文字の一覧とローマ字対応表
// ============================================

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

// --------------------------------------------------
// 文字種 (Family)
// --------------------------------------------------

/// 出題する文字の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Hiragana,
    Katakana,
    #[default]
    Both,
}

impl Family {
    pub const ALL: [Family; 3] = [Family::Hiragana, Family::Katakana, Family::Both];

    /// URL やクエリで使う小文字の名前
    pub fn as_str(self) -> &'static str {
        match self {
            Family::Hiragana => "hiragana",
            Family::Katakana => "katakana",
            Family::Both => "both",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Family::Hiragana => "Hiragana",
            Family::Katakana => "Katakana",
            Family::Both => "Both",
        };
        f.write_str(label)
    }
}

// --------------------------------------------------
// エラー
// --------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KanaError {
    #[error("unknown character: {0:?}")]
    UnknownCharacter(char),

    #[error("no characters to draw from for {0}")]
    EmptyCharacterSet(Family),
}

// --------------------------------------------------
// 対応表
// --------------------------------------------------

/// ひらがな (表示順 = 出題候補の順番)
#[rustfmt::skip]
pub const HIRAGANA_TABLE: &[(char, &str)] = &[
    ('あ', "a"), ('い', "i"), ('う', "u"), ('え', "e"), ('お', "o"),
    ('か', "ka"), ('き', "ki"), ('く', "ku"), ('け', "ke"), ('こ', "ko"),
    ('さ', "sa"), ('し', "shi"), ('す', "su"), ('せ', "se"), ('そ', "so"),
    ('た', "ta"), ('ち', "chi"), ('つ', "tsu"), ('て', "te"), ('と', "to"),
    ('な', "na"), ('に', "ni"), ('ぬ', "nu"), ('ね', "ne"), ('の', "no"),
    ('は', "ha"), ('ひ', "hi"), ('ふ', "fu"), ('へ', "he"), ('ほ', "ho"),
    ('ま', "ma"), ('み', "mi"), ('む', "mu"), ('め', "me"), ('も', "mo"),
    ('や', "ya"), ('ゆ', "yu"), ('よ', "yo"),
    ('ら', "ra"), ('り', "ri"), ('る', "ru"), ('れ', "re"), ('ろ', "ro"),
    ('わ', "wa"), ('を', "o"), ('ん', "n"),
    ('が', "ga"), ('ぎ', "gi"), ('ぐ', "gu"), ('げ', "ge"), ('ご', "go"),
    ('ざ', "za"), ('じ', "ji"), ('ず', "zu"), ('ぜ', "ze"), ('ぞ', "zo"),
    ('だ', "da"), ('ぢ', "ji"), ('づ', "zu"), ('で', "de"), ('ど', "do"),
    ('ば', "ba"), ('び', "bi"), ('ぶ', "bu"), ('べ', "be"), ('ぼ', "bo"),
    ('ぱ', "pa"), ('ぴ', "pi"), ('ぷ', "pu"), ('ぺ', "pe"), ('ぽ', "po"),
    // 小書き
    ('ぁ', "a"), ('ぃ', "i"), ('ぅ', "u"), ('ぇ', "e"), ('ぉ', "o"),
    ('ゃ', "ya"), ('ゅ', "yu"), ('ょ', "yo"), ('っ', "tsu"),
];

/// カタカナ
#[rustfmt::skip]
pub const KATAKANA_TABLE: &[(char, &str)] = &[
    ('ア', "a"), ('イ', "i"), ('ウ', "u"), ('エ', "e"), ('オ', "o"),
    ('カ', "ka"), ('キ', "ki"), ('ク', "ku"), ('ケ', "ke"), ('コ', "ko"),
    ('サ', "sa"), ('シ', "shi"), ('ス', "su"), ('セ', "se"), ('ソ', "so"),
    ('タ', "ta"), ('チ', "chi"), ('ツ', "tsu"), ('テ', "te"), ('ト', "to"),
    ('ナ', "na"), ('ニ', "ni"), ('ヌ', "nu"), ('ネ', "ne"), ('ノ', "no"),
    ('ハ', "ha"), ('ヒ', "hi"), ('フ', "fu"), ('ヘ', "he"), ('ホ', "ho"),
    ('マ', "ma"), ('ミ', "mi"), ('ム', "mu"), ('メ', "me"), ('モ', "mo"),
    ('ヤ', "ya"), ('ユ', "yu"), ('ヨ', "yo"),
    ('ラ', "ra"), ('リ', "ri"), ('ル', "ru"), ('レ', "re"), ('ロ', "ro"),
    ('ワ', "wa"), ('ヰ', "i"), ('ヱ', "e"), ('ヲ', "o"), ('ン', "n"),
    ('ガ', "ga"), ('ギ', "gi"), ('グ', "gu"), ('ゲ', "ge"), ('ゴ', "go"),
    ('ザ', "za"), ('ジ', "ji"), ('ズ', "zu"), ('ゼ', "ze"), ('ゾ', "zo"),
    ('ダ', "da"), ('ヂ', "ji"), ('ヅ', "zu"), ('デ', "de"), ('ド', "do"),
    ('バ', "ba"), ('ビ', "bi"), ('ブ', "bu"), ('ベ', "be"), ('ボ', "bo"),
    ('パ', "pa"), ('ピ', "pi"), ('プ', "pu"), ('ペ', "pe"), ('ポ', "po"),
    // 小書き
    ('ァ', "a"), ('ィ', "i"), ('ゥ', "u"), ('ェ', "e"), ('ォ', "o"),
    ('ャ', "ya"), ('ュ', "yu"), ('ョ', "yo"), ('ッ', "tsu"),
];

// --------------------------------------------------
// CharacterSet
// --------------------------------------------------

/// 出題できる文字の一覧と、文字 -> ローマ字 の辞書
///
/// 一度作ったら変更しない。プロセス全体では [`CharacterSet::global`] を共有する。
#[derive(Debug)]
pub struct CharacterSet {
    hiragana: Vec<char>,
    katakana: Vec<char>,
    /// hiragana の後ろに katakana を連結したもの
    both: Vec<char>,
    romaji: HashMap<char, &'static str>,
}

impl CharacterSet {
    /// 対応表から文字一覧と辞書を組み立てる
    pub fn from_tables(
        hiragana: &[(char, &'static str)],
        katakana: &[(char, &'static str)],
    ) -> Self {
        let hiragana_chars: Vec<char> = hiragana.iter().map(|&(c, _)| c).collect();
        let katakana_chars: Vec<char> = katakana.iter().map(|&(c, _)| c).collect();

        let mut both = Vec::with_capacity(hiragana_chars.len() + katakana_chars.len());
        both.extend_from_slice(&hiragana_chars);
        both.extend_from_slice(&katakana_chars);

        let romaji = hiragana.iter().chain(katakana).copied().collect();

        Self {
            hiragana: hiragana_chars,
            katakana: katakana_chars,
            both,
            romaji,
        }
    }

    /// 組み込みの対応表から作った共有インスタンス
    pub fn global() -> &'static CharacterSet {
        static INSTANCE: OnceLock<CharacterSet> = OnceLock::new();
        INSTANCE.get_or_init(|| CharacterSet::from_tables(HIRAGANA_TABLE, KATAKANA_TABLE))
    }

    /// 指定した文字種で出題できる文字 (固定順)
    pub fn members(&self, family: Family) -> &[char] {
        match family {
            Family::Hiragana => &self.hiragana,
            Family::Katakana => &self.katakana,
            Family::Both => &self.both,
        }
    }

    /// 1文字をローマ字にする
    pub fn romanize(&self, c: char) -> Result<&'static str, KanaError> {
        self.romaji
            .get(&c)
            .copied()
            .ok_or(KanaError::UnknownCharacter(c))
    }
}

/// [`CharacterSet::global`] の `members`
pub fn members(family: Family) -> &'static [char] {
    CharacterSet::global().members(family)
}

/// [`CharacterSet::global`] の `romanize`
pub fn romanize(c: char) -> Result<&'static str, KanaError> {
    CharacterSet::global().romanize(c)
}
