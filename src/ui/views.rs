use crate::app::state::{App, InputMode, Page};
use crate::app::tooltips::{self, Tooltip};
use crate::markup::{ColorCode, strip};
use crate::trade::MAX_BUY_AMOUNT;
use crate::ui::markup::{color, to_lines, tooltip_text};
use crate::util::{NumberFormat, format_number};
use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

/// Draws the whole screen: inventory, bazaar grid, info sidebar and status bar.
pub fn draw(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22), // Inventory
            Constraint::Percentage(56), // Bazaar
            Constraint::Percentage(22), // Info
        ])
        .split(rows[0]);

    draw_inventory(frame, app, cols[0]);
    draw_bazaar(frame, app, cols[1]);
    draw_info(frame, app, cols[2]);
    draw_status_bar(frame, app, rows[1]);

    if app.mode == InputMode::Amount {
        draw_amount_prompt(frame, app, cols[1]);
    }
}

fn draw_inventory(frame: &mut Frame, app: &App, area: Rect) {
    let rows = app.inventory_rows();
    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new(Span::styled(
            "Empty",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        rows.into_iter()
            .map(|r| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}x ", r.quantity)),
                    Span::styled(r.name, Style::default().fg(color(r.color))),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(Block::default().title("INVENTORY").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn draw_info(frame: &mut Frame, app: &App, area: Rect) {
    let now = Local::now();
    let account = &app.session.account;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(now.format("%d/%m/%Y").to_string(), Style::default().fg(color(ColorCode::Gray))),
            Span::raw(" "),
            Span::styled(now.format("%I:%M%P").to_string(), Style::default().fg(color(ColorCode::DarkGray))),
        ]),
        Line::default(),
        Line::from(vec![
            Span::raw("Purse: "),
            Span::styled(format_number(account.coins, 0), Style::default().fg(color(ColorCode::Gold))),
        ]),
        Line::from(vec![
            Span::raw("Orders: "),
            Span::styled(app.orders_label(), Style::default().fg(color(ColorCode::Aqua))),
        ]),
    ];

    let compact = NumberFormat::new(1).short().trimmed();
    lines.push(Line::from(vec![
        Span::raw("Spent: "),
        Span::styled(compact.format(account.stats.coins_spent), Style::default().fg(color(ColorCode::Red))),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Earned: "),
        Span::styled(compact.format(account.stats.coins_earned), Style::default().fg(color(ColorCode::Green))),
    ]));

    if let Some(p) = app.current_item() {
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::raw("Held: "),
            Span::styled(
                format_number(account.held(&p.id) as f64, 0),
                Style::default().fg(color(ColorCode::Green)),
            ),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        account.username.clone(),
        Style::default().fg(color(ColorCode::Yellow)),
    )));

    let info = Paragraph::new(lines)
        .block(Block::default().title("BAZAAR").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, area);
}

fn draw_bazaar(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let header = Paragraph::new(app.title()).style(Style::default().fg(Color::Yellow));
    frame.render_widget(header, layout[0]);

    match app.nav.page {
        Page::Orders => draw_orders(frame, app, layout[1]),
        Page::Bazaar if app.nav.item.is_some() => draw_item_detail(frame, app, layout[1]),
        Page::Bazaar if app.nav.section.is_some() => draw_products(frame, app, layout[1]),
        Page::Bazaar => draw_front_page(frame, app, layout[1]),
    }
}

fn draw_front_page(frame: &mut Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let catalog = &app.data.catalog;
    let titles: Vec<Line> = catalog
        .categories
        .values()
        .map(|c| to_lines(&tooltips::category(c).title).remove(0))
        .collect();
    let selected = catalog.categories.get_index_of(&app.nav.category).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().title("Categories (←/→)").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(tabs, layout[0]);

    let tips: Vec<Tooltip> = app
        .current_category()
        .map(|c| c.sections.values().map(tooltips::section).collect())
        .unwrap_or_default();
    draw_tooltip_list(frame, app, layout[1], "Sections (Enter to open)", &tips);
}

fn draw_products(frame: &mut Frame, app: &App, area: Rect) {
    let tips: Vec<Tooltip> = app
        .current_section()
        .map(|s| s.products.iter().map(tooltips::product).collect())
        .unwrap_or_default();
    draw_tooltip_list(frame, app, area, "Products (Enter to open)", &tips);
}

fn draw_tooltip_list(frame: &mut Frame, app: &App, area: Rect, title: &str, tips: &[Tooltip]) {
    let items: Vec<ListItem> = tips
        .iter()
        .map(|t| ListItem::new(tooltip_text(&t.title, t.text.as_deref())))
        .collect();

    let mut list_state = ListState::default();
    if !tips.is_empty() {
        list_state.select(Some(app.nav.selected_index));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .title(Line::from(vec![
                    Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(" – "),
                    Span::styled(format!("{} entries", tips.len()), Style::default().fg(Color::Gray)),
                ]))
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_item_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(p) = app.current_item() else {
        let msg = Paragraph::new("No product selected").block(Block::default().borders(Borders::ALL));
        frame.render_widget(msg, area);
        return;
    };
    let q = app.current_quote();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    draw_tooltip(frame, top[0], "b", &tooltips::buy_instantly(p, q));
    draw_tooltip(frame, top[1], "s", &tooltips::sell_instantly(p, q));
    draw_tooltip(frame, top[2], "", &tooltips::item_card(p));
    draw_tooltip(frame, bottom[0], "", &tooltips::buy_orders(p, q));
    draw_tooltip(frame, bottom[1], "", &tooltips::sell_offers(p, q));
}

fn draw_tooltip(frame: &mut Frame, area: Rect, key: &str, tip: &Tooltip) {
    let mut block = Block::default().borders(Borders::ALL);
    if !key.is_empty() {
        block = block.title(format!("[{key}]"));
    }
    let para = Paragraph::new(tooltip_text(&tip.title, tip.text.as_deref()))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(para, area);
}

fn draw_orders(frame: &mut Frame, app: &App, area: Rect) {
    let orders = &app.session.account.orders;
    let items: Vec<ListItem> = if orders.is_empty() {
        vec![ListItem::new(Span::styled(
            "You don't have any orders!",
            Style::default().fg(color(ColorCode::Gray)),
        ))]
    } else {
        orders
            .iter()
            .map(|o| {
                let name = &app.data.catalog.lookup(&o.item_id).name;
                ListItem::new(format!(
                    "{:?} {}x {} @ {} coins",
                    o.kind,
                    o.amount,
                    name,
                    format_number(o.price_per_unit, 1)
                ))
            })
            .collect()
    };
    let list = List::new(items).block(
        Block::default()
            .title(format!("Orders {}", app.orders_label()))
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

fn draw_amount_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.current_item() {
        Some(p) => format!("Buy {}", strip(&tooltips::product(p).title)),
        None => "Buy Instantly".to_string(),
    };
    let width = (title.chars().count() as u16 + 4).max(40);
    let popup = centered(area, width, 3);
    let text = Line::from(vec![
        Span::raw(format!("Amount (1-{MAX_BUY_AMOUNT}): ")),
        Span::styled(
            format!("{}_", app.amount_input),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);
    let prompt = Paragraph::new(text).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(Clear, popup);
    frame.render_widget(prompt, popup);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match (app.mode, app.nav.page) {
        (InputMode::Amount, _) => "Enter confirm • Esc cancel",
        (_, Page::Orders) => "Esc back • q quit",
        _ if app.nav.item.is_some() => "b buy • s sell all • Esc back • o orders • q quit",
        _ if app.nav.section.is_some() => "Enter open • ↑/↓ navigate • Esc back • q quit",
        _ => "Enter open • ←/→ category • S sell inventory • o orders • q quit",
    };
    let status_line = Line::from(vec![
        Span::styled(app.status.clone(), Style::default().fg(Color::Gray)),
        Span::raw("   "),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
        Span::raw("   |  Prices from: "),
        Span::styled(app.prices_updated(), Style::default().fg(Color::DarkGray)),
    ]);

    let status = Paragraph::new(status_line).wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}
