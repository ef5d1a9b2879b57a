//! Words, letters and the dictionary every solver draws from.

use std::{
    collections::BTreeSet,
    fmt::{Debug, Display},
    fs::File,
    io::{BufRead, BufReader},
    ops::Deref,
    path::Path,
    str::FromStr,
    sync::Arc,
};

use log::debug;
use rand::Rng;

use crate::{DictionaryError, PuzzleError, Result};

/// The number of letters in every word.
pub const WORD_LEN: usize = 5;

/// A Wordle word.
///
/// This struct represents five uppercase ASCII letters, and its construction
/// is validated to ensure that every instance is a well formed word. It does
/// not need to be part of any [`Dictionary`].
///
/// # Examples
///
/// ```rust
/// use wordle_duel::Word;
///
/// let pints: Word = "pints".parse()?;
/// assert_eq!(pints.to_string(), "PINTS");
///
/// assert!("pint".parse::<Word>().is_err());
/// assert!("pint5".parse::<Word>().is_err());
/// #
/// # Ok::<_, wordle_duel::DuelError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word([u8; WORD_LEN]);

impl Word {
    /// Returns the letters of the word, all uppercase ASCII.
    pub fn letters(&self) -> &[u8; WORD_LEN] {
        &self.0
    }

    /// Returns true if `letter` appears anywhere in the word.
    pub fn contains(&self, letter: u8) -> bool {
        self.0.contains(&letter)
    }

    /// Returns true if the word contains every letter in `letters`.
    pub fn contains_all(&self, letters: LetterSet) -> bool {
        letters.iter().all(|l| self.contains(l))
    }
}

impl FromStr for Word {
    type Err = crate::DuelError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != WORD_LEN || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(PuzzleError::InvalidWord(s.to_string()).into());
        }

        let mut letters = [0; WORD_LEN];
        for (slot, b) in letters.iter_mut().zip(bytes) {
            *slot = b.to_ascii_uppercase();
        }
        Ok(Word(letters))
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &l in &self.0 {
            write!(f, "{}", l as char)?;
        }
        Ok(())
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Word({})", self)
    }
}

/// A set of the uppercase letters `A` through `Z`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a letter. Anything other than an uppercase ASCII letter is ignored.
    pub fn insert(&mut self, letter: u8) {
        if letter.is_ascii_uppercase() {
            self.0 |= 1 << (letter - b'A');
        }
    }

    pub fn contains(&self, letter: u8) -> bool {
        letter.is_ascii_uppercase() && self.0 & (1 << (letter - b'A')) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterates over the letters in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (b'A'..=b'Z').filter(move |&l| self.contains(l))
    }
}

impl Debug for LetterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter().map(char::from)).finish()
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = LetterSet::new();
        for l in iter {
            set.insert(l);
        }
        set
    }
}

/// The set of words a solver may guess and a puzzle may hide.
///
/// A dictionary is never empty. Its words are kept sorted and unique, and
/// that order is the one solvers use to break ties. Cloning a dictionary is
/// cheap: clones share the same read-only storage.
#[derive(Clone, PartialEq, Eq)]
pub struct Dictionary {
    words: Arc<[Word]>,
}

impl Dictionary {
    /// Builds a dictionary from already validated words, collapsing duplicates.
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Result<Self> {
        let words: BTreeSet<Word> = words.into_iter().collect();
        if words.is_empty() {
            return Err(DictionaryError::Empty.into());
        }

        Ok(Dictionary {
            words: words.into_iter().collect(),
        })
    }

    /// Parses a newline-delimited word list.
    ///
    /// Each line is trimmed and upper-cased. Lines that are not exactly five
    /// ASCII letters are skipped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wordle_duel::Dictionary;
    ///
    /// let dictionary = Dictionary::parse("abide\n  Amuse \nabide\nno\nab1de\n")?;
    /// assert_eq!(dictionary.len(), 2);
    /// assert!(dictionary.contains(&"AMUSE".parse()?));
    ///
    /// assert!(Dictionary::parse("\n\n").is_err());
    /// #
    /// # Ok::<_, wordle_duel::DuelError>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_lines(text.lines().map(str::to_owned))
    }

    /// Reads a newline-delimited word list, as in [`parse()`](Self::parse()).
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let lines = reader
            .split(b'\n')
            .map(|line| line.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(DictionaryError::from)?;
        Self::from_lines(lines)
    }

    /// Opens and reads a word list file, as in [`parse()`](Self::parse()).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path).map_err(DictionaryError::from)?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_lines(lines: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut rejected = 0;
        let words = lines
            .into_iter()
            .filter_map(|line| match line.trim().parse::<Word>() {
                Ok(word) => Some(word),
                Err(_) => {
                    rejected += 1;
                    None
                }
            })
            .collect::<Vec<_>>();

        let dictionary = Self::from_words(words)?;
        debug!(
            "loaded {} words into the dictionary, rejected {} lines",
            dictionary.len(),
            rejected
        );
        Ok(dictionary)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false, since construction rejects empty word lists.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.words.binary_search(word).is_ok()
    }

    /// Picks a word uniformly at random.
    pub fn random(&self, rng: &mut impl Rng) -> Word {
        self.words[rng.gen_range(0..self.words.len())]
    }
}

impl Deref for Dictionary {
    type Target = [Word];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

impl Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dictionary({} words)", self.len())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DuelError;

    #[test]
    fn words_are_uppercased() -> Result<(), DuelError> {
        let word: Word = "aLoHa".parse()?;
        assert_eq!(word.letters(), b"ALOHA");
        assert!(word.contains(b'H'));
        assert!(!word.contains(b'h'));
        Ok(())
    }

    #[test]
    fn malformed_words_are_rejected() {
        for bad in ["", "abcd", "abcdef", "ab de", "ab-de", "ábcde"] {
            assert!(
                matches!(
                    bad.parse::<Word>(),
                    Err(DuelError::Puzzle {
                        kind: PuzzleError::InvalidWord(_)
                    })
                ),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn letter_sets() -> Result<(), DuelError> {
        let mut set = LetterSet::new();
        assert!(set.is_empty());

        set.insert(b'Q');
        set.insert(b'A');
        set.insert(b'A');
        set.insert(b'q');
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), b"AQ");

        let word: Word = "QUALM".parse()?;
        assert!(word.contains_all(set));
        assert!(word.contains_all(LetterSet::new()));
        assert!(!word.contains_all(b"AZ".iter().copied().collect()));
        Ok(())
    }

    #[test]
    fn dictionary_is_sorted_and_unique() -> Result<(), DuelError> {
        let dictionary = Dictionary::parse("amuse\nABODE\n abide\nabode\r\n")?;
        let listed: Vec<String> = dictionary.iter().map(Word::to_string).collect();
        assert_eq!(listed, ["ABIDE", "ABODE", "AMUSE"]);
        Ok(())
    }

    #[test]
    fn dictionary_skips_invalid_lines() -> Result<(), DuelError> {
        let dictionary = Dictionary::parse("crane\ncranes\ncr4ne\n\n  slate\t\n")?;
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.contains(&"SLATE".parse()?));
        assert!(!dictionary.contains(&"CRANK".parse()?));
        Ok(())
    }

    #[test]
    fn undecodable_lines_are_skipped() -> Result<(), DuelError> {
        let dictionary = Dictionary::from_reader(&b"crane\n\xff\xfe\nslate\r\n"[..])?;
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.contains(&"CRANE".parse()?));
        assert!(dictionary.contains(&"SLATE".parse()?));
        Ok(())
    }

    #[test]
    fn empty_dictionary_is_fatal() {
        assert!(matches!(
            Dictionary::parse("toolong\nshrt\n"),
            Err(DuelError::Dictionary {
                kind: DictionaryError::Empty
            })
        ));
        assert!(Dictionary::from_words(Vec::new()).is_err());
    }

    #[test]
    fn dictionary_from_reader() -> Result<(), DuelError> {
        let text = "stare\nroast\ntoast\n";
        let dictionary = Dictionary::from_reader(text.as_bytes())?;
        assert_eq!(dictionary, Dictionary::parse(text)?);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            Dictionary::from_path("/this/path/does/not/exist.txt"),
            Err(DuelError::Dictionary {
                kind: DictionaryError::Io(_)
            })
        ));
    }

    #[test]
    fn random_words_come_from_the_dictionary() -> Result<(), DuelError> {
        use rand::{rngs::StdRng, SeedableRng};

        let dictionary = Dictionary::parse("crane\nslate\ntrace\n")?;
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert!(dictionary.contains(&dictionary.random(&mut rng)));
        }
        Ok(())
    }
}
