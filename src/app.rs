use tokio::task::JoinHandle;

use crate::client::{GenerateError, GeneratorClient};
use crate::models::{AdRequest, AdResponse};

/// Copy-flash duration in ticks; the tick timer fires every 300ms, so 7
/// ticks keeps the "COPIED" label up for roughly two seconds.
const COPY_FLASH_TICKS: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Form,
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Form fields in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ProductName,
    Description,
    TargetAudience,
    Platform,
    CampaignGoal,
    Framework,
    Tone,
}

impl FormField {
    pub fn all() -> &'static [FormField] {
        &[
            FormField::ProductName,
            FormField::Description,
            FormField::TargetAudience,
            FormField::Platform,
            FormField::CampaignGoal,
            FormField::Framework,
            FormField::Tone,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::ProductName => "Product Name",
            FormField::Description => "Short Description",
            FormField::TargetAudience => "Target Audience",
            FormField::Platform => "Platform",
            FormField::CampaignGoal => "Campaign Goal",
            FormField::Framework => "Marketing Framework",
            FormField::Tone => "Ad Tone",
        }
    }

    /// Select-style fields cycle through fixed options instead of taking
    /// typed input.
    pub fn is_select(&self) -> bool {
        matches!(
            self,
            FormField::Platform | FormField::Framework | FormField::Tone
        )
    }
}

/// Results-canvas sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsTab {
    Variations,
    Insights,
    Compliance,
    Channels,
}

impl ResultsTab {
    pub fn all() -> &'static [ResultsTab] {
        &[
            ResultsTab::Variations,
            ResultsTab::Insights,
            ResultsTab::Compliance,
            ResultsTab::Channels,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            ResultsTab::Variations => "A/B Variations",
            ResultsTab::Insights => "Audience Insights",
            ResultsTab::Compliance => "Compliance",
            ResultsTab::Channels => "Channels",
        }
    }

    pub fn cycled(self, step: isize) -> Self {
        let all = Self::all();
        let len = all.len() as isize;
        let i = all.iter().position(|t| *t == self).unwrap_or(0) as isize;
        all[(i + step).rem_euclid(len) as usize]
    }
}

/// The three editable fields of a variation under edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    pub headline: String,
    pub primary_text: String,
    pub cta: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Headline,
    PrimaryText,
    Cta,
}

impl EditField {
    pub fn label(&self) -> &'static str {
        match self {
            EditField::Headline => "Headline",
            EditField::PrimaryText => "Body text",
            EditField::Cta => "Call to Action",
        }
    }

    pub fn next(self) -> Self {
        match self {
            EditField::Headline => EditField::PrimaryText,
            EditField::PrimaryText => EditField::Cta,
            EditField::Cta => EditField::Headline,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            EditField::Headline => EditField::Cta,
            EditField::PrimaryText => EditField::Headline,
            EditField::Cta => EditField::PrimaryText,
        }
    }
}

/// Edit state as a tagged union: a buffer cannot exist without the index of
/// the variation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum EditMode {
    Viewing,
    Editing {
        index: usize,
        buffer: EditBuffer,
        field: EditField,
    },
}

pub struct App {
    pub should_quit: bool,
    pub focus: FocusPane,
    pub input_mode: InputMode,

    // Form state
    pub draft: AdRequest,
    pub form_cursor: usize,
    pub input_cursor: usize,

    // Generation cycle
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<AdResponse>,
    pub generate_task: Option<JoinHandle<Result<AdResponse, GenerateError>>>,

    // Results canvas
    pub tab: ResultsTab,
    pub selected_variation: usize,
    pub canvas_scroll: u16,
    pub canvas_height: u16,
    pub total_canvas_lines: u16,

    // Variation editing
    pub edit: EditMode,

    // Presentation
    pub animation_frame: u8,
    pub copy_flash: u8,

    pub client: GeneratorClient,
}

impl App {
    pub fn new(client: GeneratorClient) -> Self {
        Self {
            should_quit: false,
            focus: FocusPane::Form,
            input_mode: InputMode::Normal,

            draft: AdRequest::default(),
            form_cursor: 0,
            input_cursor: 0,

            loading: false,
            error: None,
            result: None,
            generate_task: None,

            tab: ResultsTab::Variations,
            selected_variation: 0,
            canvas_scroll: 0,
            canvas_height: 0,
            total_canvas_lines: 0,

            edit: EditMode::Viewing,

            animation_frame: 0,
            copy_flash: 0,

            client,
        }
    }

    pub fn form_field(&self) -> FormField {
        FormField::all()[self.form_cursor]
    }

    pub fn form_nav_down(&mut self) {
        self.form_cursor = (self.form_cursor + 1).min(FormField::all().len() - 1);
    }

    pub fn form_nav_up(&mut self) {
        self.form_cursor = self.form_cursor.saturating_sub(1);
    }

    /// Value of a form field as shown in the sidebar.
    pub fn form_value(&self, field: FormField) -> &str {
        match field {
            FormField::ProductName => &self.draft.product_name,
            FormField::Description => &self.draft.description,
            FormField::TargetAudience => &self.draft.target_audience,
            FormField::Platform => self.draft.platform.as_str(),
            FormField::CampaignGoal => &self.draft.campaign_goal,
            FormField::Framework => self.draft.framework.as_str(),
            FormField::Tone => self.draft.tone.as_str(),
        }
    }

    /// Cycle the focused select field through its options.
    pub fn cycle_form_field(&mut self, step: isize) {
        match self.form_field() {
            FormField::Platform => self.draft.platform = self.draft.platform.cycled(step),
            FormField::Framework => self.draft.framework = self.draft.framework.cycled(step),
            FormField::Tone => self.draft.tone = self.draft.tone.cycled(step),
            _ => {}
        }
    }

    /// The text buffer currently receiving keystrokes: the variation edit
    /// buffer when one is open, otherwise the focused form text field.
    pub fn active_input_mut(&mut self) -> Option<&mut String> {
        let form_field = self.form_field();
        if let EditMode::Editing { buffer, field, .. } = &mut self.edit {
            return Some(match field {
                EditField::Headline => &mut buffer.headline,
                EditField::PrimaryText => &mut buffer.primary_text,
                EditField::Cta => &mut buffer.cta,
            });
        }
        if self.focus != FocusPane::Form {
            return None;
        }
        match form_field {
            FormField::ProductName => Some(&mut self.draft.product_name),
            FormField::Description => Some(&mut self.draft.description),
            FormField::TargetAudience => Some(&mut self.draft.target_audience),
            FormField::CampaignGoal => Some(&mut self.draft.campaign_goal),
            _ => None,
        }
    }

    pub fn active_input(&self) -> Option<&String> {
        if let EditMode::Editing { buffer, field, .. } = &self.edit {
            return Some(match field {
                EditField::Headline => &buffer.headline,
                EditField::PrimaryText => &buffer.primary_text,
                EditField::Cta => &buffer.cta,
            });
        }
        if self.focus != FocusPane::Form {
            return None;
        }
        match self.form_field() {
            FormField::ProductName => Some(&self.draft.product_name),
            FormField::Description => Some(&self.draft.description),
            FormField::TargetAudience => Some(&self.draft.target_audience),
            FormField::CampaignGoal => Some(&self.draft.campaign_goal),
            _ => None,
        }
    }

    /// First required field that is still blank, if any.
    pub fn first_missing_field(&self) -> Option<FormField> {
        if self.draft.product_name.trim().is_empty() {
            Some(FormField::ProductName)
        } else if self.draft.description.trim().is_empty() {
            Some(FormField::Description)
        } else if self.draft.target_audience.trim().is_empty() {
            Some(FormField::TargetAudience)
        } else {
            None
        }
    }

    /// Kick off a generation request. A no-op while one is already in
    /// flight; a blank required field fails before any network traffic.
    pub fn submit(&mut self) {
        if self.loading {
            return;
        }
        if let Some(field) = self.first_missing_field() {
            self.fail_submit(format!("{} is required", field.label()));
            return;
        }

        self.loading = true;
        self.error = None;
        self.result = None;
        self.edit = EditMode::Viewing;
        self.input_mode = InputMode::Normal;
        self.tab = ResultsTab::Variations;
        self.selected_variation = 0;
        self.canvas_scroll = 0;
        self.focus = FocusPane::Canvas;

        tracing::info!(
            product = %self.draft.product_name,
            platform = self.draft.platform.as_str(),
            framework = self.draft.framework.as_str(),
            "submitting generation request"
        );

        let client = self.client.clone();
        let request = self.draft.clone();
        self.generate_task = Some(tokio::spawn(async move { client.generate(&request).await }));
    }

    /// Drain the generation task once it finishes. Called from the event
    /// loop after every event, which the 300ms tick keeps moving.
    pub async fn poll_generate(&mut self) {
        let finished = self
            .generate_task
            .as_ref()
            .map_or(false, |task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.generate_task.take() {
            match task.await {
                Ok(outcome) => self.finish_submit(outcome),
                Err(e) => {
                    tracing::error!(error = %e, "generation task aborted");
                    self.fail_submit("The request was interrupted. Please try again.".to_string());
                }
            }
        }
    }

    /// Apply the outcome of a generation call. `loading` clears on every
    /// path and an error never leaves a stale result behind.
    pub fn finish_submit(&mut self, outcome: Result<AdResponse, GenerateError>) {
        match outcome {
            Ok(result) => {
                tracing::info!(variations = result.variations.len(), "generation succeeded");
                self.error = None;
                self.result = Some(result);
                self.loading = false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "generation failed");
                self.fail_submit(e.to_string());
            }
        }
    }

    fn fail_submit(&mut self, message: String) {
        self.result = None;
        self.error = Some(message);
        self.loading = false;
    }

    /// Clear error/result state and go back to the empty form canvas. The
    /// draft survives; only restarting the program resets it.
    pub fn reset(&mut self) {
        self.error = None;
        self.result = None;
        self.edit = EditMode::Viewing;
        self.input_mode = InputMode::Normal;
        self.focus = FocusPane::Form;
        self.canvas_scroll = 0;
    }

    pub fn variation_count(&self) -> usize {
        self.result.as_ref().map_or(0, |r| r.variations.len())
    }

    pub fn select_next_variation(&mut self) {
        let count = self.variation_count();
        if count > 0 {
            self.selected_variation = (self.selected_variation + 1).min(count - 1);
        }
    }

    pub fn select_prev_variation(&mut self) {
        self.selected_variation = self.selected_variation.saturating_sub(1);
    }

    /// Copy one variation's three editable fields into a fresh edit buffer.
    /// Requires a result and an in-bounds index; otherwise nothing changes.
    pub fn begin_edit(&mut self, index: usize) {
        let Some(result) = &self.result else {
            return;
        };
        let Some(variation) = result.variations.get(index) else {
            return;
        };

        self.edit = EditMode::Editing {
            index,
            buffer: EditBuffer {
                headline: variation.headline.clone(),
                primary_text: variation.primary_text.clone(),
                cta: variation.cta.clone(),
            },
            field: EditField::Headline,
        };
        self.input_mode = InputMode::Editing;
        self.input_cursor = self
            .active_input()
            .map_or(0, |text| text.chars().count());
    }

    /// Commit the edit buffer back into the variation it was opened for.
    /// Only headline, body and CTA change; the angle stays. Local-only:
    /// nothing is sent back to the service.
    pub fn save_edit(&mut self) {
        if let EditMode::Editing { index, buffer, .. } =
            std::mem::replace(&mut self.edit, EditMode::Viewing)
        {
            if let Some(result) = &mut self.result {
                if let Some(variation) = result.variations.get_mut(index) {
                    variation.headline = buffer.headline;
                    variation.primary_text = buffer.primary_text;
                    variation.cta = buffer.cta;
                }
            }
        }
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_edit(&mut self) {
        self.edit = EditMode::Viewing;
        self.input_mode = InputMode::Normal;
    }

    /// Move the edit cursor to another field of the open buffer.
    pub fn edit_focus(&mut self, forward: bool) {
        if let EditMode::Editing { field, .. } = &mut self.edit {
            *field = if forward { field.next() } else { field.prev() };
        }
        self.input_cursor = self
            .active_input()
            .map_or(0, |text| text.chars().count());
    }

    /// Clipboard text for a variation, in the shared export format.
    pub fn variation_export_text(&self, index: usize) -> Option<String> {
        let variation = self.result.as_ref()?.variations.get(index)?;
        Some(format!(
            "{}\n\n{}\n\nCTA: {}",
            variation.headline, variation.primary_text, variation.cta
        ))
    }

    pub fn flash_copied(&mut self) {
        self.copy_flash = COPY_FLASH_TICKS;
    }

    /// Advance the spinner and decay the copy flash; driven by the tick
    /// event.
    pub fn tick(&mut self) {
        if self.loading {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        self.copy_flash = self.copy_flash.saturating_sub(1);
    }

    // Canvas scrolling for the non-variation tabs.
    pub fn scroll_down(&mut self) {
        if self.canvas_scroll < self.total_canvas_lines.saturating_sub(self.canvas_height) {
            self.canvas_scroll = self.canvas_scroll.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        self.canvas_scroll = self.canvas_scroll.saturating_sub(1);
    }
}
