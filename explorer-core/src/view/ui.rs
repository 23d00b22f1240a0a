//! src/view/ui.rs
//! ============================================================
//! Frame renderer. Reads the controller (render plan, search
//! state, navigator) and paints one frame; it never mutates
//! anything but its own frame counter.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
};
use tracing::trace;

use crate::controller::explorer::{ExplorerController, IndexStatus};
use crate::model::entries::{DatasetItem, DiskEntry, FileEntry};
use crate::search::highlight::HighlightSegment;
use crate::search::ranker::DisplayResult;
use crate::util::humanize::format_date;
use crate::view::{
    icons,
    projector::{Body, Card, ColumnSet, RenderPlan},
    theme,
};

/// Width of one grid card, borders included.
const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 5;

#[derive(Debug, Default)]
pub struct UIRenderer {
    frames: u64,
}

impl UIRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, f: &mut Frame<'_>, ctl: &ExplorerController) {
        self.frames += 1;
        trace!(frame = self.frames, "render");

        let plan = ctl.render_plan();
        f.render_widget(Block::default().style(theme::base_style()), f.area());

        if plan.chrome {
            let [title, search, body, status] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Fill(1),
                Constraint::Length(1),
            ])
            .areas(f.area());

            draw_title(f, ctl, &plan, title);
            draw_search_box(f, ctl, search, true);
            draw_content(f, ctl, &plan, body);
            draw_status(f, ctl, status);
        } else {
            let [search, body] =
                Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(f.area());
            draw_search_box(f, ctl, search, false);
            draw_content(f, ctl, &plan, body);
        }
    }
}

fn draw_title(f: &mut Frame<'_>, ctl: &ExplorerController, plan: &RenderPlan<'_>, area: Rect) {
    let section = plan.section.map_or("Not found", |s| s.title());
    let loading = if plan.loading { " (loading...)" } else { "" };
    let index = match ctl.index_status() {
        IndexStatus::Building => "indexing",
        IndexStatus::Ready => "index ready",
        IndexStatus::Failed => "index unavailable",
        IndexStatus::NotStarted => "",
    };

    let line = Line::from(vec![
        Span::styled(format!(" Explorer | {section}{loading}"), theme::title_style()),
        Span::raw("  "),
        Span::styled(format!("[{}]", ctl.view_mode().button_text()), theme::header_style()),
        Span::raw("  "),
        Span::styled(index, theme::muted_style()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_search_box(f: &mut Frame<'_>, ctl: &ExplorerController, area: Rect, bordered: bool) {
    let state = ctl.search().state();
    let mut spans = vec![
        Span::styled(format!("{} ", icons::SEARCH_ICON), theme::muted_style()),
        Span::raw(state.query_text.as_str()),
    ];
    if state.is_searching {
        spans.push(Span::styled("  searching...", theme::muted_style()));
    }

    let mut paragraph = Paragraph::new(Line::from(spans));
    if bordered {
        paragraph = paragraph.block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .border_style(theme::border_style()),
        );
    }
    f.render_widget(paragraph, area);
}

fn draw_content(f: &mut Frame<'_>, ctl: &ExplorerController, plan: &RenderPlan<'_>, area: Rect) {
    if ctl.search().state().query_text.trim().is_empty() {
        draw_body(f, plan, area);
    } else {
        draw_search_results(f, ctl, area, plan.chrome);
    }
}

fn draw_status(f: &mut Frame<'_>, ctl: &ExplorerController, area: Rect) {
    let nav = ctl.navigator();
    let previous = nav.previous_directory().unwrap_or("-");
    let text = format!(
        " {}  (back: {})  | Esc clear  Tab mode  ^H home  ^B back  F1-F4 sections  ^R refresh  ^N more  ^Q quit",
        nav.current_directory(),
        previous
    );
    f.render_widget(Paragraph::new(text).style(theme::muted_style()), area);
}

/* ------------------------------ search ------------------------------- */

fn highlighted(segments: &[HighlightSegment]) -> Vec<Span<'_>> {
    segments
        .iter()
        .map(|seg| {
            if seg.is_match {
                Span::styled(seg.text.as_str(), theme::match_style())
            } else {
                Span::raw(seg.text.as_str())
            }
        })
        .collect()
}

fn result_item(result: &DisplayResult) -> ListItem<'_> {
    let mut spans = vec![Span::raw(format!("{} ", icons::for_file_type(result.entry.file_type)))];
    spans.extend(highlighted(&result.highlighted_name));
    spans.push(Span::styled(
        format!("  {}  {}", result.display_directory, result.entry.formatted_size),
        theme::muted_style(),
    ));
    ListItem::new(Line::from(spans))
}

fn draw_search_results(f: &mut Frame<'_>, ctl: &ExplorerController, area: Rect, chrome: bool) {
    let search = ctl.search();
    let block = if chrome {
        Block::default()
            .borders(Borders::ALL)
            .title(" Results ")
            .border_style(theme::border_style())
    } else {
        Block::default()
    };

    if let Some(error) = &search.state().error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(theme::error_style()).block(block),
            area,
        );
        return;
    }

    let window = search.window();
    if window.visible.is_empty() {
        let text = if search.state().is_searching || search.is_pending() {
            "Searching..."
        } else {
            "No results"
        };
        f.render_widget(Paragraph::new(text).style(theme::muted_style()).block(block), area);
        return;
    }

    let mut items: Vec<ListItem<'_>> = window.visible.iter().map(result_item).collect();
    if window.hidden > 0 {
        items.push(ListItem::new(Span::styled(
            format!("  {} more (Ctrl-N to show)", window.hidden),
            theme::muted_style(),
        )));
    }
    f.render_widget(List::new(items).block(block), area);
}

/* ------------------------------ datasets ----------------------------- */

fn draw_body(f: &mut Frame<'_>, plan: &RenderPlan<'_>, area: Rect) {
    let block = if plan.chrome {
        Block::default().borders(Borders::ALL).border_style(theme::border_style())
    } else {
        Block::default()
    };

    match &plan.body {
        Body::Table { header, columns, rows } => draw_table(f, *header, *columns, rows, block, area),
        Body::Cards(cards) => draw_cards(f, cards, block, area),
        Body::CompactColumns { left, right } => {
            let inner = block.inner(area);
            f.render_widget(block, area);
            let [l, r] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(inner);
            f.render_widget(List::new(left.iter().map(compact_item).collect::<Vec<_>>()), l);
            f.render_widget(List::new(right.iter().map(compact_item).collect::<Vec<_>>()), r);
        }
        Body::Empty(message) => draw_message(f, message, block, area),
        Body::NotFound { route } => draw_message(f, &format!("Page not found: {route}"), block, area),
    }
}

fn draw_message(f: &mut Frame<'_>, message: &str, block: Block<'_>, area: Rect) {
    let paragraph = Paragraph::new(message)
        .style(theme::muted_style())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

fn file_row(file: &FileEntry) -> Row<'_> {
    Row::new(vec![
        Cell::from(format!("{} {}", icons::for_file_type(file.file_type), file.file_name)),
        Cell::from(format_date(&file.modification_date)),
        Cell::from(file.formatted_size.as_str()),
        Cell::from(file.file_type.label()),
    ])
    .style(theme::file_type_style(file.file_type))
}

fn disk_row(disk: &DiskEntry) -> Row<'_> {
    Row::new(vec![
        Cell::from(format!("{} {}", icons::DISK_ICON, disk.name)),
        Cell::from(disk.kind.as_str()),
        Cell::from(disk.formatted_used.as_str()),
        Cell::from(disk.formatted_available.as_str()),
        Cell::from(disk.formatted_total.as_str()),
        Cell::from(Span::styled(
            format!("{}%", disk.usage_percentage()),
            theme::usage_style(disk.usage_level()),
        )),
    ])
}

fn widths(columns: ColumnSet) -> Vec<Constraint> {
    match columns {
        ColumnSet::Files => vec![
            Constraint::Fill(1),
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
        ColumnSet::Disks => vec![
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(6),
        ],
    }
}

fn draw_table(
    f: &mut Frame<'_>,
    header: Option<ColumnSet>,
    columns: ColumnSet,
    rows: &[DatasetItem],
    block: Block<'_>,
    area: Rect,
) {
    let rows: Vec<Row<'_>> = rows
        .iter()
        .map(|item| match item {
            DatasetItem::Disk(disk) => disk_row(disk),
            DatasetItem::File(file) => file_row(file),
        })
        .collect();

    let mut table = Table::new(rows, widths(columns)).block(block);
    if let Some(header) = header {
        table = table.header(
            Row::new(header.titles().to_vec())
                .style(theme::header_style())
                .bottom_margin(1),
        );
    }
    f.render_widget(table, area);
}

fn card_lines<'a>(card: &Card<'a>) -> (String, Vec<Line<'a>>) {
    match *card {
        Card::Disk(disk) => (
            format!(" {} {} ", icons::DISK_ICON, disk.name),
            vec![
                Line::from(format!("{} | {} free", disk.kind, disk.formatted_available)),
                Line::from(Span::styled(
                    format!("{}% of {}", disk.usage_percentage(), disk.formatted_total),
                    theme::usage_style(disk.usage_level()),
                )),
            ],
        ),
        Card::File(file) => (
            format!(" {} {} ", icons::for_file_type(file.file_type), file.file_name),
            vec![
                Line::from(file.formatted_size.as_str()),
                Line::from(Span::styled(format_date(&file.modification_date), theme::muted_style())),
            ],
        ),
    }
}

fn draw_cards(f: &mut Frame<'_>, cards: &[Card<'_>], block: Block<'_>, area: Rect) {
    let inner = block.inner(area);
    f.render_widget(block, area);

    let per_row = (inner.width / CARD_WIDTH).max(1);
    for (i, card) in cards.iter().enumerate() {
        let Ok(i) = u16::try_from(i) else { break };
        let x = inner.x + (i % per_row) * CARD_WIDTH;
        let y = inner.y + (i / per_row) * CARD_HEIGHT;
        if y + CARD_HEIGHT > inner.bottom() {
            break;
        }

        let (title, lines) = card_lines(card);
        let slot = Rect::new(x, y, CARD_WIDTH.min(inner.width), CARD_HEIGHT);
        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_style(theme::title_style())
                .border_style(theme::border_style()),
        );
        f.render_widget(paragraph, slot);
    }
}

fn compact_item<'a>(card: &Card<'a>) -> ListItem<'a> {
    match *card {
        Card::Disk(disk) => ListItem::new(Line::from(vec![
            Span::raw(format!("{} {}", icons::DISK_ICON, disk.name)),
            Span::styled(
                format!("  {}%", disk.usage_percentage()),
                theme::usage_style(disk.usage_level()),
            ),
        ])),
        Card::File(file) => ListItem::new(Line::from(vec![
            Span::styled(
                format!("{} {}", icons::for_file_type(file.file_type), file.file_name),
                theme::file_type_style(file.file_type),
            ),
            Span::styled(format!("  {}", file.formatted_size), theme::muted_style()),
        ])),
    }
}
