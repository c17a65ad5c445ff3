use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use regression::{Pipeline, PredictErr, ValidationPolicy, FEATURE_KEY};
use serde_json::json;

pub enum Action {
    None,
    Quit,
}

/// What the output panel currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Readout {
    /// Nothing typed yet.
    Idle,
    Predicted { salary: f64, experience: f64 },
    /// The input was rejected before reaching the model.
    Invalid(String),
    /// The model itself failed.
    Failed(String),
}

/// The form's single input field and the prediction derived from it.
pub struct FormState {
    pipeline: Pipeline,
    input: String,
    readout: Readout,
}

impl FormState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            input: String::new(),
            readout: Readout::Idle,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    pub fn is_polynomial(&self) -> bool {
        self.pipeline.is_polynomial()
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
        self.refresh();
    }

    pub fn pop(&mut self) {
        self.input.pop();
        self.refresh();
    }

    /// Clears the input and the readout.
    pub fn reset(&mut self) {
        self.input.clear();
        self.readout = Readout::Idle;
    }

    /// Recomputes the readout from the current input.
    fn refresh(&mut self) {
        let text = self.input.trim();
        if text.is_empty() {
            self.readout = Readout::Idle;
            return;
        }

        let payload = json!({ FEATURE_KEY: text });

        self.readout = match self.pipeline.handle(&payload, ValidationPolicy::form()) {
            Ok(p) => Readout::Predicted {
                salary: p.predicted_salary,
                experience: p.years_experience,
            },
            Err(PredictErr::InvalidValue { reason, .. }) => Readout::Invalid(reason),
            Err(e) => Readout::Failed(e.to_string()),
        };
    }
}

pub fn handle_key(state: &mut FormState, key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('r') if ctrl => {
            state.reset();
            Action::None
        }
        KeyCode::Backspace => {
            state.pop();
            Action::None
        }
        KeyCode::Char(c) if !ctrl => {
            state.push(c);
            Action::None
        }
        _ => Action::None,
    }
}

/// Formats an amount as dollars with thousands separators, e.g. `$95,000.00` or `$-1,500.00`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{amount:.2}");
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("${sign}{grouped}.{cents}")
}

/// Formats years of experience always showing a decimal part, e.g. `5.0`.
pub fn format_years(years: f64) -> String {
    format!("{years:?}")
}
