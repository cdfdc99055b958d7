use std::fmt;

/// A collector number split into its numeric prefix and optional face letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollectorNumber {
    number: u32,
    letter: Option<char>,
}

impl CollectorNumber {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let digits_end = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        let number = raw[..digits_end].parse::<u32>().ok()?;
        let letter = raw[digits_end..]
            .chars()
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase());

        Some(Self { number, letter })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    /// Next free number: the letter moves on when there is one, otherwise
    /// the number grows by `amount`
    pub fn increment(&self, amount: u32) -> Option<Self> {
        match self.letter {
            Some('z') => None,
            Some(letter) => Some(Self {
                number: self.number,
                letter: char::from_u32(letter as u32 + 1),
            }),
            None => Some(Self {
                number: self.number.checked_add(amount)?,
                letter: None,
            }),
        }
    }
}

impl fmt::Display for CollectorNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.letter {
            Some(letter) => write!(f, "{}{}", self.number, letter),
            None => write!(f, "{}", self.number),
        }
    }
}

/// `a` for index 0, `b` for 1 and so on
pub fn face_letter(index: usize) -> char {
    char::from_u32('a' as u32 + (index % 26) as u32).unwrap_or('a')
}
