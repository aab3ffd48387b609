// ============================================
// src/tui.rs
// ターミナル版クイズ (TUIセットアップ・実行ループ・描画)
// ============================================

use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rand::Rng;

use crate::kana::{Family, KanaError};
use crate::quiz::Quiz;

const PLACEHOLDER: &str = "Type the Romaji representation and press Enter 👆";

// --------------------------------------------------
// データ構造
// --------------------------------------------------

/// ターミナル版の状態 (クイズ + 入力中の文字列)
pub struct App<R> {
    quiz: Quiz<R>,
    input: String,
    should_quit: bool,
}

impl<R: Rng> App<R> {
    pub fn new(family: Family, rng: R) -> Result<Self, KanaError> {
        Ok(Self {
            quiz: Quiz::new(family, rng)?,
            input: String::new(),
            should_quit: false,
        })
    }

    pub fn quiz(&self) -> &Quiz<R> {
        &self.quiz
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// キー入力の処理
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<(), KanaError> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('h') if ctrl => {
                self.quiz.switch_family(Family::Hiragana)?;
            }
            KeyCode::Char('k') if ctrl => {
                self.quiz.switch_family(Family::Katakana)?;
            }
            KeyCode::Char('b') if ctrl => {
                self.quiz.switch_family(Family::Both)?;
            }
            KeyCode::Enter => {
                self.quiz.submit(&self.input)?;
                self.input.clear();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            _ => {}
        }

        Ok(())
    }
}

// --------------------------------------------------
// 実行
// --------------------------------------------------

/// ターミナル版を起動する。終了時 (エラー時も) 端末の状態を戻す
pub fn run(family: Family) -> Result<()> {
    let mut app = App::new(family, rand::rng())?;

    let mut terminal =
        or_cleanup(setup_terminal(), restore_terminal).context("failed to set up the terminal")?;
    let result = run_app(&mut terminal, &mut app);
    restore_terminal().context("failed to restore the terminal")?;

    tracing::info!(points = app.quiz().points(), "quiz finished");
    result
}

fn setup_terminal() -> Result<Terminal<impl Backend>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?;
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

/// 途中で失敗しても raw モードは必ず解除する
fn restore_terminal() -> Result<()> {
    let show = stdout().execute(Show).map(drop);
    let leave = stdout().execute(LeaveAlternateScreen).map(drop);
    disable_raw_mode()?;
    show?;
    leave?;
    Ok(())
}

/// 失敗したら `cleanup` を呼んでから元のエラーを返す
fn or_cleanup<T>(result: Result<T>, cleanup: impl FnOnce() -> Result<()>) -> Result<T> {
    if result.is_err() {
        if let Err(error) = cleanup() {
            tracing::warn!(%error, "failed to restore the terminal");
        }
    }
    result
}

fn run_app<R: Rng>(terminal: &mut Terminal<impl Backend>, app: &mut App<R>) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }
    }

    Ok(())
}

// --------------------------------------------------
// UI描画
// --------------------------------------------------

fn ui<R>(f: &mut Frame, app: &App<R>)
where
    R: Rng,
{
    let size = f.area();
    let block = Block::default().borders(Borders::ALL).title("Kana Quiz");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // [0] お題
            Constraint::Length(2), // [1] 入力欄
            Constraint::Length(2), // [2] 結果 + 得点
            Constraint::Length(1), // [3] 文字種
            Constraint::Min(1),    // [4] 操作説明
        ])
        .split(inner_area);

    let accent = Style::default().fg(Color::Magenta);

    // 0. お題
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Kana Word: ", accent),
            Span::raw(app.quiz.current_word().to_string()).bold(),
        ])),
        chunks[0],
    );

    // 1. 入力欄
    let input = if app.input.is_empty() {
        Line::from(vec![
            Span::raw("> "),
            Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(vec![
            Span::raw("> "),
            Span::raw(app.input.as_str()),
            Span::styled(" ", Style::default().bg(Color::White)),
        ])
    };
    f.render_widget(Paragraph::new(input), chunks[1]);

    // 2. 結果
    f.render_widget(
        Paragraph::new(app.quiz.status_line()).style(Style::default().fg(Color::Yellow)),
        chunks[2],
    );

    // 3. 文字種
    let mut spans = vec![Span::styled("Kana mode: ", accent)];
    for family in Family::ALL {
        if family == app.quiz.family() {
            spans.push(Span::styled(family.to_string(), Style::default().fg(Color::Green)));
        } else {
            spans.push(Span::raw(shortcut_label(family)));
        }
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[3]);

    // 4. 操作説明
    f.render_widget(
        Paragraph::new("(esc or ctrl-c to quit)").style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}

fn shortcut_label(family: Family) -> &'static str {
    match family {
        Family::Hiragana => "ctrl-(h)iragana",
        Family::Katakana => "ctrl-(k)atakana",
        Family::Both => "ctrl-(b)oth",
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::kana;

    fn new_app(family: Family) -> App<StdRng> {
        App::new(family, StdRng::seed_from_u64(5)).unwrap()
    }

    fn press(app: &mut App<StdRng>, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn ctrl(app: &mut App<StdRng>, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
            .unwrap();
    }

    fn type_text(app: &mut App<StdRng>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &App<StdRng>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn typing_and_submitting() {
        let mut app = new_app(Family::Hiragana);
        let expected = app.quiz().current_word().to_romaji().unwrap();

        type_text(&mut app, &expected);
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input(), expected);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.quiz().points(), 1);
        assert!(app.input().is_empty());
    }

    #[test]
    fn control_keys_switch_family() {
        let mut app = new_app(Family::Both);

        ctrl(&mut app, 'k');
        assert_eq!(app.quiz().family(), Family::Katakana);
        let katakana = kana::members(Family::Katakana);
        assert!(app.quiz().current_word().chars().iter().all(|c| katakana.contains(c)));

        ctrl(&mut app, 'h');
        assert_eq!(app.quiz().family(), Family::Hiragana);

        ctrl(&mut app, 'b');
        assert_eq!(app.quiz().family(), Family::Both);

        // 切り替えは入力欄に文字を入れない
        assert!(app.input().is_empty());
    }

    #[test]
    fn failed_setup_runs_cleanup() {
        let mut cleaned = false;
        let result: Result<()> = or_cleanup(Err(anyhow::anyhow!("no tty")), || {
            cleaned = true;
            Ok(())
        });
        assert!(cleaned);
        assert_eq!(result.unwrap_err().to_string(), "no tty");

        // cleanup 自体の失敗では元のエラーを置き換えない
        let result: Result<()> = or_cleanup(Err(anyhow::anyhow!("no tty")), || {
            Err(anyhow::anyhow!("still raw"))
        });
        assert_eq!(result.unwrap_err().to_string(), "no tty");

        let mut cleaned = false;
        let result = or_cleanup(Ok(3), || {
            cleaned = true;
            Ok(())
        });
        assert!(!cleaned);
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn quit_keys() {
        let mut app = new_app(Family::Both);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());

        let mut app = new_app(Family::Both);
        ctrl(&mut app, 'c');
        assert!(app.should_quit());
    }

    #[test]
    fn renders_status_and_mode() {
        let mut app = new_app(Family::Katakana);
        let text = screen(&app);
        assert!(text.contains("Kana Word:"));
        assert!(text.contains("(Points: 0)"));
        assert!(text.contains("Katakana"));
        assert!(text.contains("ctrl-(h)iragana"));
        assert!(text.contains("ctrl-(b)oth"));
        assert!(text.contains("(esc or ctrl-c to quit)"));

        press(&mut app, KeyCode::Enter);
        let text = screen(&app);
        assert!(text.contains("Incorrect. The answer is"));
    }
}
