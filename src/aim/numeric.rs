//! Typed-angle aiming

/// Longest angle text accepted from the keyboard
const MAX_ANGLE_CHARS: usize = 8;

/// Angle entered as text, read at swing time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericAim {
    text: String,
}

impl NumericAim {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole field
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append one typed character. Only digits, a leading minus and a
    /// single decimal point are accepted.
    pub fn push_char(&mut self, c: char) -> bool {
        if self.text.len() >= MAX_ANGLE_CHARS {
            return false;
        }
        let accepted = match c {
            '0'..='9' => true,
            '-' => self.text.is_empty(),
            '.' => !self.text.contains('.'),
            _ => false,
        };
        if accepted {
            self.text.push(c);
        }
        accepted
    }

    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Base angle in degrees, or None when the text is not a finite number
    pub fn base_angle(&self) -> Option<f64> {
        self.text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|angle| angle.is_finite())
    }
}
