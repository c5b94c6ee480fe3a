use std::fmt;

use super::tile::letter_index;

/// Set of the letters a..z packed into a bitmask
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct LetterSet {
    // bit is one if letter is in it
    accepted: u32,
}

const ALL: u32 = (1 << 26) - 1;

impl LetterSet {
    pub fn empty() -> Self {
        Self { accepted: 0 }
    }
    pub fn contains(&self, letter: char) -> bool {
        letter_index(letter).map_or(false, |i| self.accepted & (1 << i) != 0)
    }
    /// Adds the letter, returning false if it was already present
    pub fn insert(&mut self, letter: char) -> bool {
        match letter_index(letter) {
            Some(i) => {
                let fresh = self.accepted & (1 << i) == 0;
                self.accepted |= 1 << i;
                fresh
            }
            None => false,
        }
    }
    pub fn is_any(&self) -> bool {
        self.accepted == ALL
    }
}

impl Default for LetterSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::iter::FromIterator<char> for LetterSet {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = char>,
    {
        let mut tmp = Self::default();
        iter.into_iter().for_each(|l| {
            tmp.insert(l);
        });
        tmp
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_any() {
            write!(f, ".")
        } else {
            write!(f, "[")?;
            for l in 'a'..='z' {
                if self.contains(l) {
                    write!(f, "{}", l)?;
                }
            }
            write!(f, "]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LetterSet;

    #[test]
    fn test_insert_is_case_insensitive() {
        let mut set = LetterSet::empty();
        assert!(set.insert('e'));
        assert!(!set.insert('E'));
        assert!(!set.insert('#'));
        assert!(set.contains('E'));
        assert!(!set.contains('f'));
    }

    #[test]
    fn test_debug() {
        let set: LetterSet = "zebra".chars().collect();
        assert_eq!(format!("{:?}", set), "[aberz]");
        let all: LetterSet = ('a'..='z').collect();
        assert_eq!(format!("{:?}", all), ".");
        assert!(all.contains('q'));
    }
}
