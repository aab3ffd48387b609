// ============================================
// src/word.rs
// お題 (ランダムなかな列) の生成とローマ字変換
// ============================================

use std::fmt;

use rand::Rng;

use crate::kana::{CharacterSet, Family, KanaError};

/// お題の最小文字数
pub const MIN_WORD_LEN: usize = 1;
/// お題の最大文字数
pub const MAX_WORD_LEN: usize = 5;

/// 1ラウンド分のお題
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Word {
    chars: Vec<char>,
}

impl Word {
    pub fn new(chars: Vec<char>) -> Self {
        Self { chars }
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 正解のローマ字
    pub fn to_romaji(&self) -> Result<String, KanaError> {
        to_romaji(self.chars.iter().copied())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl From<&str> for Word {
    fn from(text: &str) -> Self {
        Self::new(text.chars().collect())
    }
}

/// [`CharacterSet`] からお題を作る
#[derive(Debug, Clone, Copy)]
pub struct WordGenerator<'a> {
    set: &'a CharacterSet,
}

impl Default for WordGenerator<'static> {
    fn default() -> Self {
        Self::new(CharacterSet::global())
    }
}

impl<'a> WordGenerator<'a> {
    pub fn new(set: &'a CharacterSet) -> Self {
        Self { set }
    }

    /// 1〜5文字のお題をランダムに作る
    ///
    /// 文字数を一様に選んだあと、各文字を `family` の候補から重複ありで一様に選ぶ。
    pub fn new_word<R>(&self, family: Family, rng: &mut R) -> Result<Word, KanaError>
    where
        R: Rng,
    {
        let pool = self.set.members(family);

        if pool.is_empty() {
            return Err(KanaError::EmptyCharacterSet(family));
        }

        let len = rng.random_range(MIN_WORD_LEN..=MAX_WORD_LEN);
        let chars = (0..len)
            .map(|_| pool[rng.random_range(0..pool.len())])
            .collect();

        Ok(Word::new(chars))
    }

    /// 各文字のローマ字をつなげる (文字をまたいだ変換はしない)
    pub fn to_romaji<I>(&self, chars: I) -> Result<String, KanaError>
    where
        I: IntoIterator<Item = char>,
    {
        let mut romaji = String::new();
        for c in chars {
            romaji.push_str(self.set.romanize(c)?);
        }
        Ok(romaji)
    }
}

/// 組み込みの対応表でお題を作る
pub fn new_word<R>(family: Family, rng: &mut R) -> Result<Word, KanaError>
where
    R: Rng,
{
    let word = WordGenerator::default().new_word(family, rng)?;
    tracing::debug!(%family, %word, "new word");
    Ok(word)
}

/// 組み込みの対応表でローマ字にする
pub fn to_romaji<I>(chars: I) -> Result<String, KanaError>
where
    I: IntoIterator<Item = char>,
{
    WordGenerator::default().to_romaji(chars)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::kana;

    #[test]
    fn word_length_and_pool() {
        let mut rng = StdRng::seed_from_u64(7);

        for family in Family::ALL {
            let pool = kana::members(family);
            for _ in 0..500 {
                let word = new_word(family, &mut rng).unwrap();
                assert!((MIN_WORD_LEN..=MAX_WORD_LEN).contains(&word.len()));
                assert!(word.chars().iter().all(|c| pool.contains(c)));
                assert!(word.to_romaji().is_ok());
            }
        }
    }

    #[test]
    fn every_length_shows_up() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; MAX_WORD_LEN + 1];

        for _ in 0..1000 {
            let word = new_word(Family::Both, &mut rng).unwrap();
            seen[word.len()] = true;
        }

        assert!(seen[MIN_WORD_LEN..].iter().all(|&s| s));
    }

    #[test]
    fn same_seed_same_word() {
        let a = new_word(Family::Katakana, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = new_word(Family::Katakana, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_pool() {
        let set = CharacterSet::from_tables(&[], kana::KATAKANA_TABLE);
        let generator = WordGenerator::new(&set);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(
            generator.new_word(Family::Hiragana, &mut rng),
            Err(KanaError::EmptyCharacterSet(Family::Hiragana))
        );
        assert!(generator.new_word(Family::Katakana, &mut rng).is_ok());
        assert!(generator.new_word(Family::Both, &mut rng).is_ok());
    }

    #[test]
    fn romaji_examples() {
        assert_eq!(to_romaji(['あ', 'い']).unwrap(), "ai");
        assert_eq!(to_romaji(['し']).unwrap(), "shi");
        assert_eq!(to_romaji(['っ']).unwrap(), "tsu");
        assert_eq!(to_romaji(Vec::<char>::new()).unwrap(), "");
        assert_eq!(Word::from("きっぷ").to_romaji().unwrap(), "kitsupu");
        assert_eq!(Word::from("カタカナ").to_romaji().unwrap(), "katakana");
    }

    #[test]
    fn romaji_unknown_character() {
        assert_eq!(
            to_romaji("あxい".chars()),
            Err(KanaError::UnknownCharacter('x'))
        );
    }

    #[test]
    fn display() {
        assert_eq!(Word::new(vec!['ね', 'こ']).to_string(), "ねこ");
        assert_eq!(Word::default().to_string(), "");
    }
}
