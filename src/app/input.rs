use crossterm::event::{self, KeyCode, KeyEventKind};

/// Block until a key is pressed. Releases and repeats are skipped.
pub fn next_key_press() -> std::io::Result<KeyCode> {
    loop {
        if let event::Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            return Ok(key.code);
        }
    }
}

/// Outcome of feeding one key to a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer<T> {
    Pending,
    Accepted(T),
    Cancelled,
}

/// Digits typed for one maze dimension, checked against the largest size the terminal can show.
#[derive(Debug)]
pub struct DimensionInput {
    digits: String,
    max: u16,
}

impl DimensionInput {
    /// `u16::MAX` has five digits, nothing longer can parse.
    const MAX_DIGITS: usize = 5;

    pub fn new(max: u16) -> Self {
        Self {
            digits: String::new(),
            max,
        }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Parsed value, or the message to show under the prompt.
    /// Empty input means "as large as fits".
    pub fn value(&self) -> Result<u16, String> {
        if self.digits.is_empty() {
            return Ok(self.max);
        }
        match self.digits.parse::<u16>() {
            Ok(n) if (1..=self.max).contains(&n) => Ok(n),
            _ => Err(format!("Please enter a number between 1 and {}.", self.max)),
        }
    }

    pub fn press(&mut self, code: KeyCode) -> Answer<u16> {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() && self.digits.len() < Self::MAX_DIGITS => {
                self.digits.push(c);
            }
            KeyCode::Backspace => {
                self.digits.pop();
            }
            KeyCode::Enter => {
                if let Ok(n) = self.value() {
                    return Answer::Accepted(n);
                }
            }
            KeyCode::Esc => return Answer::Cancelled,
            _ => {}
        }
        Answer::Pending
    }
}

/// Highlighted entry of a vertical choice list; arrows wrap around at both ends.
#[derive(Debug)]
pub struct Choice<'a, T> {
    options: &'a [T],
    selected: usize,
}

impl<'a, T: Copy> Choice<'a, T> {
    /// `None` when there is nothing to choose from.
    pub fn new(options: &'a [T]) -> Option<Self> {
        (!options.is_empty()).then_some(Self {
            options,
            selected: 0,
        })
    }

    pub fn options(&self) -> &'a [T] {
        self.options
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn press(&mut self, code: KeyCode) -> Answer<T> {
        let len = self.options.len();
        match code {
            KeyCode::Up => self.selected = (self.selected + len - 1) % len,
            KeyCode::Down => self.selected = (self.selected + 1) % len,
            KeyCode::Enter => return Answer::Accepted(self.options[self.selected]),
            KeyCode::Esc => return Answer::Cancelled,
            _ => {}
        }
        Answer::Pending
    }
}
