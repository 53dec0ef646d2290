use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use flagquiz::quiz::{Resolution, Snapshot};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const ANSWER_BOX_WIDTH: u16 = 40;
const CURSOR: &str = "▏";

/// Rightmost slice of `text` that fits in `max_width` columns
fn visible_tail(text: &str, max_width: usize) -> &str {
    if text.width() <= max_width {
        return text;
    }
    let mut width = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        width += c.width().unwrap_or(0);
        if width > max_width {
            break;
        }
        start = idx;
    }
    &text[start..]
}

fn timer_style(remaining: u32, total: u32) -> Style {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let (remaining, total) = (u64::from(remaining), u64::from(total));
    if remaining * 6 <= total {
        bold.fg(Color::Red)
    } else if remaining * 3 <= total {
        bold.fg(Color::Yellow)
    } else {
        bold
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.quiz.snapshot();
        if snap.game_over {
            render_game_over(&snap, area, buf);
        } else {
            render_question(&snap, area, buf);
        }
    }
}

fn render_question(snap: &Snapshot, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(2), // title
                Constraint::Length(2), // round / question
                Constraint::Length(3), // flag
                Constraint::Length(2), // timer
                Constraint::Length(3), // answer box
                Constraint::Length(3), // feedback
                Constraint::Min(0),
                Constraint::Length(1), // score
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    Paragraph::new(Span::styled(
        "Guess the Country by Emoji",
        Style::default().patch(bold_style).fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Round {} / {}", snap.round, snap.total_rounds),
            bold_style,
        )),
        Line::from(format!(
            "Question {} / {}",
            snap.question_in_round, snap.questions_per_round
        )),
    ])
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(vec![Line::default(), Line::from(snap.emoji)])
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        format!("Time left: {}s", snap.time_remaining),
        timer_style(snap.time_remaining, snap.timer_seconds),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    // answer box, centered horizontally
    let box_width = ANSWER_BOX_WIDTH.min(chunks[4].width);
    let box_area = Rect {
        x: chunks[4].x + (chunks[4].width - box_width) / 2,
        width: box_width,
        ..chunks[4]
    };
    let inner_width = box_width.saturating_sub(2 + CURSOR.width() as u16) as usize;
    let answer_line = if snap.answer_revealed {
        Line::from(Span::styled(
            visible_tail(snap.user_answer, inner_width).to_string(),
            dim_style,
        ))
    } else if snap.user_answer.is_empty() {
        Line::from(vec![
            Span::raw(CURSOR),
            Span::styled("Type country name", dim_style.patch(italic_style)),
        ])
    } else {
        Line::from(vec![
            Span::raw(visible_tail(snap.user_answer, inner_width).to_string()),
            Span::raw(CURSOR),
        ])
    };
    Paragraph::new(answer_line)
        .block(Block::default().borders(Borders::ALL).title("Your answer"))
        .render(box_area, buf);

    if let Some(resolution) = snap.resolution {
        let verdict = match resolution {
            Resolution::Correct => Span::styled("Correct! +1 point", green_bold_style),
            Resolution::Incorrect => Span::styled("Wrong!", red_bold_style),
            Resolution::TimedOut => Span::styled("Time's up!", red_bold_style),
        };
        let mut lines = vec![Line::from(verdict)];
        if !resolution.is_correct() {
            lines.push(Line::from(vec![
                Span::raw("Correct answer: "),
                Span::styled(snap.country, bold_style),
            ]));
        }
        let next_label = if snap.is_last_question {
            "(enter) finish"
        } else {
            "(enter) next"
        };
        lines.push(Line::from(Span::styled(next_label, italic_style)));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[5], buf);
    }

    Paragraph::new(format!("Current score: {}", snap.score))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

    Paragraph::new(Span::styled(
        "(enter) guess / (ctrl+r) restart / (esc)ape",
        italic_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[8], buf);
}

fn render_game_over(snap: &Snapshot, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let score_color = if snap.score == snap.total_questions {
        Color::Green
    } else if snap.score * 2 >= snap.total_questions {
        Color::Yellow
    } else {
        Color::Red
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Percentage(40),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    Paragraph::new(Span::styled(
        "Game Over!",
        Style::default().patch(bold_style).fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("Your score: {} / {}", snap.score, snap.total_questions),
        Style::default().patch(bold_style).fg(score_color),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        "(enter) play again / (q)uit",
        italic_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}
