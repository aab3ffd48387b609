// ============================================
// src/quiz.rs
// 1ラウンドごとの状態 (お題・判定・得点)
// ============================================

use rand::Rng;

use crate::kana::{Family, KanaError};
use crate::word::{self, Word};

/// 直前の回答の結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// まだ回答していない
    #[default]
    Idle,
    Correct,
    Incorrect {
        /// 正解のローマ字
        expected: String,
    },
}

/// `submit` の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub correct: bool,
    /// 回答したお題
    pub word: Word,
    pub expected: String,
}

/// クイズ全体の状態を管理する
#[derive(Debug)]
pub struct Quiz<R> {
    family: Family,
    current_word: Word,
    status: Status,
    points: u32,
    rng: R,
}

impl<R: Rng> Quiz<R> {
    /// 最初のお題を作って開始する
    pub fn new(family: Family, mut rng: R) -> Result<Self, KanaError> {
        let current_word = word::new_word(family, &mut rng)?;

        Ok(Self {
            family,
            current_word,
            status: Status::Idle,
            points: 0,
            rng,
        })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn current_word(&self) -> &Word {
        &self.current_word
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// 文字種を切り替える。同じ文字種なら何もしない
    ///
    /// 切り替えたら新しい文字種からすぐにお題を作り直す。
    pub fn switch_family(&mut self, family: Family) -> Result<bool, KanaError> {
        if self.family == family {
            return Ok(false);
        }

        let next = word::new_word(family, &mut self.rng)?;
        tracing::info!(from = %self.family, to = %family, "switching kana family");
        self.family = family;
        self.current_word = next;
        Ok(true)
    }

    /// 回答を判定して次のお題へ進む
    ///
    /// 大文字小文字と前後の空白は無視する。
    pub fn submit(&mut self, answer: &str) -> Result<Outcome, KanaError> {
        let expected = self.current_word.to_romaji()?;
        let answer = answer.trim().to_lowercase();
        let correct = answer == expected;

        tracing::debug!(word = %self.current_word, %answer, %expected, correct, "answer");

        if correct {
            self.points += 1;
            self.status = Status::Correct;
        } else {
            self.status = Status::Incorrect {
                expected: expected.clone(),
            };
        }

        let next = word::new_word(self.family, &mut self.rng)?;
        let word = std::mem::replace(&mut self.current_word, next);

        Ok(Outcome {
            correct,
            word,
            expected,
        })
    }

    /// ステータス行 (結果 + 得点)
    pub fn status_line(&self) -> String {
        let message = match &self.status {
            Status::Idle => String::new(),
            Status::Correct => "🎉 Correct!".to_string(),
            Status::Incorrect { expected } => format!("😭 Incorrect. The answer is {expected}"),
        };
        format!("{message} (Points: {})", self.points)
    }
}
