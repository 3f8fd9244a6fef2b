use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
};

use crate::app::{App, EditField, EditMode, FocusPane, FormField, InputMode, ResultsTab};

/// Accent color and marker glyph for a variation angle. Unrecognized angles
/// fall back to the Emotional accent with a neutral marker.
fn angle_accent(angle: &str) -> (Color, &'static str) {
    match angle {
        "Emotional" => (Color::Magenta, "♥"),
        "Logical" => (Color::Cyan, "◈"),
        "Scarcity" => (Color::Red, "⚡"),
        _ => (Color::Magenta, "✎"),
    }
}

fn risk_color(risk_level: &str) -> Color {
    match risk_level.to_lowercase().as_str() {
        "low" => Color::Green,
        "medium" => Color::Yellow,
        "high" => Color::Red,
        _ => Color::DarkGray,
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [form_area, canvas_area] =
        Layout::horizontal([Constraint::Length(36), Constraint::Min(0)]).areas(body_area);

    render_form(app, frame, form_area);
    render_canvas(app, frame, canvas_area);

    render_footer(app, frame, footer_area);

    if let EditMode::Editing { .. } = app.edit {
        render_edit_popup(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let status = if app.loading {
        Span::styled(" generating ", Style::default().fg(Color::Yellow))
    } else {
        Span::raw(" ")
    };

    let title = Line::from(vec![
        Span::styled(
            " AdCopy Studio ",
            Style::default().fg(Color::Cyan).bold(),
        ),
        status,
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_form(app: &mut App, frame: &mut Frame, area: Rect) {
    let form_focused = app.focus == FocusPane::Form;
    let border_color = if form_focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Campaign Setup ");

    let inner = block.inner(area);
    let inner_width = inner.width as usize;

    let editing_form = form_focused
        && app.input_mode == InputMode::Editing
        && matches!(app.edit, EditMode::Viewing);

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_position: Option<(u16, u16)> = None;

    for (idx, field) in FormField::all().iter().enumerate() {
        let is_current = form_focused && app.form_cursor == idx;

        let label_style = if is_current {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));

        let value = app.form_value(*field);
        let field_editing = is_current && editing_form && !field.is_select();

        // Horizontal window so the cursor stays visible in long values.
        let scroll = if field_editing && inner_width > 0 && app.input_cursor >= inner_width {
            app.input_cursor - inner_width + 1
        } else {
            0
        };
        let visible: String = value.chars().skip(scroll).take(inner_width.max(1)).collect();

        let value_line = if field.is_select() {
            let marker_style = if is_current {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(vec![
                Span::styled("‹ ", marker_style),
                Span::styled(visible, Style::default().fg(Color::White)),
                Span::styled(" ›", marker_style),
            ])
        } else if visible.is_empty() && !field_editing {
            Line::from(Span::styled(placeholder(*field), Style::default().fg(Color::DarkGray).italic()))
        } else {
            let style = if field_editing {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(visible, style))
        };
        lines.push(value_line);
        lines.push(Line::default());

        if field_editing {
            let y = inner.y + (idx as u16) * 3 + 1;
            let x = inner.x + (app.input_cursor - scroll) as u16;
            cursor_position = Some((x.min(inner.x + inner.width.saturating_sub(1)), y));
        }
    }

    // The submit "button".
    let button = if app.loading {
        Span::styled(
            " Synthesizing... ",
            Style::default().bg(Color::DarkGray).fg(Color::Gray),
        )
    } else {
        Span::styled(
            " Execute Synthesis [g] ",
            Style::default().bg(Color::Magenta).fg(Color::White).bold(),
        )
    };
    lines.push(Line::from(button));

    let form = Paragraph::new(lines).block(block);
    frame.render_widget(form, area);

    if let Some((x, y)) = cursor_position {
        frame.set_cursor_position((x, y));
    }
}

fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::ProductName => "e.g. Lavender Dream Mist",
        FormField::Description => "Explain the core benefit...",
        FormField::TargetAudience => "e.g. Stressed Professionals",
        FormField::CampaignGoal => "e.g. Sales",
        _ => "",
    }
}

fn render_canvas(app: &mut App, frame: &mut Frame, area: Rect) {
    let canvas_focused = app.focus == FocusPane::Canvas;
    let border_color = if canvas_focused { Color::Cyan } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Campaign Canvas ");

    if let Some(error) = &app.error {
        let lines = vec![
            Line::default(),
            Line::from(Span::styled("  Error", Style::default().fg(Color::Red).bold())),
            Line::default(),
            Line::from(format!("  {}", error)),
            Line::default(),
            Line::from(Span::styled(
                "  Press 'r' to try again.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let canvas = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(canvas, area);
        return;
    }

    if app.loading {
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                "  GENERATING COPIES",
                Style::default().fg(Color::Yellow).bold(),
            )),
            Line::from(Span::styled(
                format!("  Talking to the ad engine{}", dots),
                Style::default().fg(Color::DarkGray).italic(),
            )),
        ];
        let canvas = Paragraph::new(lines).block(block);
        frame.render_widget(canvas, area);
        return;
    }

    let Some(result) = app.result.clone() else {
        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                "  Campaign Headquarters",
                Style::default().fg(Color::Magenta).bold(),
            )),
            Line::default(),
            Line::from(Span::styled(
                "  Enter your product details and press 'g' to generate",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "  high-converting ad copy.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let canvas = Paragraph::new(lines).block(block);
        frame.render_widget(canvas, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [summary_area, tabs_area, content_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    // Campaign summary, mirroring the submitted draft.
    let summary = Paragraph::new(vec![
        Line::from(Span::styled(
            "Ad Campaign Results",
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(Span::styled(
            format!(
                "{} • {} • {} • {} Framework",
                app.draft.product_name,
                app.draft.platform.as_str(),
                app.draft.target_audience,
                app.draft.framework.as_str(),
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(summary, summary_area);

    // Tab bar.
    let mut tab_spans: Vec<Span> = Vec::new();
    for (i, tab) in ResultsTab::all().iter().enumerate() {
        let style = if *tab == app.tab {
            Style::default().bg(Color::Blue).fg(Color::White).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(format!(" {} {} ", i + 1, tab.title()), style));
        tab_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(tab_spans)), tabs_area);

    let lines = match app.tab {
        ResultsTab::Variations => variation_lines(app, &result),
        ResultsTab::Insights => insight_lines(&result),
        ResultsTab::Compliance => compliance_lines(&result),
        ResultsTab::Channels => channel_lines(&result),
    };

    app.canvas_height = content_area.height;
    app.total_canvas_lines = lines.len() as u16;

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.canvas_scroll, 0));
    frame.render_widget(content, content_area);

    if app.total_canvas_lines > app.canvas_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));
        let mut scrollbar_state = ScrollbarState::new(app.total_canvas_lines as usize)
            .position(app.canvas_scroll as usize);
        frame.render_stateful_widget(scrollbar, content_area, &mut scrollbar_state);
    }
}

fn variant_label(index: usize) -> String {
    // A, B, C, then D and onward if the service ever sends more.
    let letter = (b'A' + (index % 26) as u8) as char;
    format!("Variant {}", letter)
}

fn variation_lines(app: &App, result: &crate::models::AdResponse) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    for (i, variation) in result.variations.iter().enumerate() {
        let selected = app.focus == FocusPane::Canvas && app.selected_variation == i;
        let (accent, icon) = angle_accent(&variation.angle);

        let mut badge: Vec<Span> = vec![
            Span::styled(
                if selected { "> " } else { "  " }.to_string(),
                Style::default().fg(Color::Yellow).bold(),
            ),
            Span::styled(format!("{} ", icon), Style::default().fg(accent)),
            Span::styled(
                variant_label(i),
                Style::default().fg(accent).bold(),
            ),
            Span::styled(
                format!(" • {} Appeal", variation.angle),
                Style::default().fg(accent),
            ),
        ];
        if selected && app.copy_flash > 0 {
            badge.push(Span::styled(
                "  COPIED",
                Style::default().fg(Color::Green).bold(),
            ));
        }
        lines.push(Line::from(badge));

        let headline_style = if selected {
            Style::default().fg(Color::White).bold().bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White).bold()
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", variation.headline),
            headline_style,
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", variation.primary_text),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(vec![
            Span::styled("  CTA ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                variation.cta.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::default());
    }

    lines
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(Color::Cyan).bold(),
    ))
}

fn bullet_lines(items: &[String]) -> Vec<Line<'static>> {
    if items.is_empty() {
        return vec![Line::from(Span::styled(
            "  (none)",
            Style::default().fg(Color::DarkGray),
        ))];
    }
    items
        .iter()
        .map(|item| Line::from(format!("  • {}", item)))
        .collect()
}

fn tag_line(items: &[String]) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", items.join(" · ")),
        Style::default().fg(Color::Gray),
    ))
}

fn insight_lines(result: &crate::models::AdResponse) -> Vec<Line<'static>> {
    let insights = &result.insights;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(section_header("Pain Points"));
    lines.extend(bullet_lines(&insights.pain_points));
    lines.push(Line::default());

    lines.push(section_header("Emotional Triggers"));
    lines.push(tag_line(&insights.emotional_triggers));
    lines.push(Line::default());

    lines.push(section_header("Objections"));
    lines.extend(bullet_lines(&insights.objections));
    lines.push(Line::default());

    lines.push(section_header("Competitive Angle"));
    lines.push(Line::from(format!("  {}", insights.competitive_angle)));
    lines.push(Line::default());

    lines.push(section_header("Key Selling Points"));
    lines.extend(
        insights
            .key_selling_points
            .iter()
            .enumerate()
            .map(|(i, point)| Line::from(format!("  {}. {}", i + 1, point))),
    );
    lines.push(Line::default());

    lines.push(section_header("Recommended Keywords"));
    lines.push(tag_line(&insights.recommended_keywords));
    lines.push(Line::default());

    lines.push(section_header("Demographics"));
    lines.push(Line::from(format!("  {}", insights.demographics)));
    lines.push(Line::default());

    lines.push(section_header("Interests (Meta/Google Ads)"));
    lines.push(tag_line(&insights.targeting_interests));
    lines.push(Line::default());

    lines.push(section_header("Behaviors"));
    lines.push(tag_line(&insights.behaviors));

    lines
}

fn compliance_lines(result: &crate::models::AdResponse) -> Vec<Line<'static>> {
    let compliance = &result.compliance;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!(" {} Risk ", compliance.risk_level),
            Style::default()
                .bg(risk_color(&compliance.risk_level))
                .fg(Color::Black)
                .bold(),
        ),
    ]));
    lines.push(Line::default());

    lines.push(section_header("Issues"));
    if compliance.issues.is_empty() {
        lines.push(Line::from(Span::styled(
            "  None flagged",
            Style::default().fg(Color::Green),
        )));
    } else {
        lines.extend(bullet_lines(&compliance.issues));
    }
    lines.push(Line::default());

    lines.push(section_header("Suggestions"));
    lines.extend(bullet_lines(&compliance.suggestions));

    lines
}

fn channel_lines(result: &crate::models::AdResponse) -> Vec<Line<'static>> {
    let channels = &result.channel_opt;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(section_header("WhatsApp Broadcast"));
    for line in channels.whatsapp.lines() {
        lines.push(Line::from(format!("  {}", line)));
    }
    lines.push(Line::default());

    lines.push(section_header("SMS Message"));
    for line in channels.sms.lines() {
        lines.push(Line::from(format!("  {}", line)));
    }
    lines.push(Line::from(Span::styled(
        format!("  {} characters", channels.sms.chars().count()),
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

fn render_edit_popup(app: &App, frame: &mut Frame, area: Rect) {
    let EditMode::Editing { index, buffer, field } = &app.edit else {
        return;
    };

    let popup_width = 64.min(area.width.saturating_sub(4));
    let popup_height = 11.min(area.height.saturating_sub(2));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" Edit {} ", variant_label(*index)));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let inner_width = inner.width as usize;
    let fields = [
        (EditField::Headline, &buffer.headline),
        (EditField::PrimaryText, &buffer.primary_text),
        (EditField::Cta, &buffer.cta),
    ];

    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_position: Option<(u16, u16)> = None;

    for (idx, (edit_field, value)) in fields.iter().enumerate() {
        let is_current = edit_field == field;
        let label_style = if is_current {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(edit_field.label(), label_style)));

        let scroll = if is_current && inner_width > 0 && app.input_cursor >= inner_width {
            app.input_cursor - inner_width + 1
        } else {
            0
        };
        let visible: String = value.chars().skip(scroll).take(inner_width.max(1)).collect();
        let value_style = if is_current {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(visible, value_style)));
        lines.push(Line::default());

        if is_current {
            let y = inner.y + (idx as u16) * 3 + 1;
            let x = inner.x + (app.input_cursor - scroll) as u16;
            cursor_position = Some((x.min(inner.x + inner.width.saturating_sub(1)), y));
        }
    }

    let body = Paragraph::new(lines);
    frame.render_widget(body, inner);

    if let Some((x, y)) = cursor_position {
        frame.set_cursor_position((x, y));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " EDIT ",
    };

    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints: Vec<Span> = if matches!(app.edit, EditMode::Editing { .. }) {
        vec![
            Span::styled(" Tab ", key_style),
            Span::styled(" next field ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled(" save ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" cancel ", label_style),
        ]
    } else if app.input_mode == InputMode::Editing {
        vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" done ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" cancel ", label_style),
        ]
    } else if app.focus == FocusPane::Canvas && app.error.is_some() {
        vec![
            Span::styled(" r ", key_style),
            Span::styled(" try again ", label_style),
            Span::styled(" Tab ", key_style),
            Span::styled(" form ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]
    } else if app.focus == FocusPane::Canvas && app.result.is_some() {
        vec![
            Span::styled(" h/l ", key_style),
            Span::styled(" section ", label_style),
            Span::styled(" j/k ", key_style),
            Span::styled(" move ", label_style),
            Span::styled(" e ", key_style),
            Span::styled(" edit ", label_style),
            Span::styled(" c ", key_style),
            Span::styled(" copy ", label_style),
            Span::styled(" r ", key_style),
            Span::styled(" new ", label_style),
            Span::styled(" Tab ", key_style),
            Span::styled(" form ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]
    } else {
        let mut hints = vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" field ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled(" edit ", label_style),
            Span::styled(" h/l ", key_style),
            Span::styled(" options ", label_style),
        ];
        if !app.loading {
            hints.extend([
                Span::styled(" g ", key_style),
                Span::styled(" generate ", label_style),
            ]);
        }
        hints.extend([
            Span::styled(" Tab ", key_style),
            Span::styled(" canvas ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]);
        hints
    };

    let footer_content = Line::from(
        vec![Span::styled(mode_text, mode_style), Span::styled(" ", label_style)]
            .into_iter()
            .chain(hints)
            .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}
