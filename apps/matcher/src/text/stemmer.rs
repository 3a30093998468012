//! Porter stemmer (Porter, 1980), operating on lowercase ASCII tokens.
//!
//! Follows the reference implementation's step order and suffix tables,
//! including the later `bli → ble` and `logi → log` revisions.

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Reduces `word` to its Porter stem.
///
/// Words of two characters or fewer, and anything that is not lowercase
/// ASCII alphanumeric, are returned unchanged.
pub fn stem(word: &str) -> String {
    if word.len() <= 2
        || !word
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    {
        return word.to_string();
    }

    let mut stemmer = Stemmer {
        b: word.as_bytes().to_vec(),
    };
    stemmer.step1a();
    stemmer.step1b();
    stemmer.step1c();
    stemmer.apply_table(STEP2_SUFFIXES);
    stemmer.apply_table(STEP3_SUFFIXES);
    stemmer.step4();
    stemmer.step5();

    String::from_utf8_lossy(&stemmer.b).into_owned()
}

struct Stemmer {
    b: Vec<u8>,
}

impl Stemmer {
    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[..len]`.
    fn measure(&self, len: usize) -> usize {
        let mut n = 0;
        let mut i = 0;
        while i < len && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < len && !self.is_consonant(i) {
                i += 1;
            }
            if i >= len {
                return n;
            }
            while i < len && self.is_consonant(i) {
                i += 1;
            }
            n += 1;
        }
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.is_consonant(i))
    }

    fn ends_with_double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.is_consonant(len - 1)
    }

    /// consonant-vowel-consonant ending, where the last consonant is not w, x or y.
    fn ends_cvc(&self, len: usize) -> bool {
        len >= 3
            && self.is_consonant(len - 1)
            && !self.is_consonant(len - 2)
            && self.is_consonant(len - 3)
            && !matches!(self.b[len - 1], b'w' | b'x' | b'y')
    }

    fn ends(&self, suffix: &str) -> bool {
        self.b.ends_with(suffix.as_bytes())
    }

    fn stem_len(&self, suffix: &str) -> usize {
        self.b.len() - suffix.len()
    }

    fn replace_suffix(&mut self, suffix: &str, replacement: &str) {
        let stem = self.stem_len(suffix);
        self.b.truncate(stem);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    fn step1a(&mut self) {
        if self.ends("sses") || self.ends("ies") {
            self.b.truncate(self.b.len() - 2);
        } else if !self.ends("ss") && self.ends("s") {
            self.b.pop();
        }
    }

    fn step1b(&mut self) {
        if self.ends("eed") {
            if self.measure(self.stem_len("eed")) > 0 {
                self.b.pop();
            }
            return;
        }

        for suffix in ["ed", "ing"] {
            if self.ends(suffix) {
                let stem = self.stem_len(suffix);
                if self.has_vowel(stem) {
                    self.b.truncate(stem);
                    self.step1b_cleanup();
                }
                return;
            }
        }
    }

    fn step1b_cleanup(&mut self) {
        let len = self.b.len();
        if self.ends("at") || self.ends("bl") || self.ends("iz") {
            self.b.push(b'e');
        } else if self.ends_with_double_consonant(len)
            && !matches!(self.b[len - 1], b'l' | b's' | b'z')
        {
            self.b.pop();
        } else if self.measure(len) == 1 && self.ends_cvc(len) {
            self.b.push(b'e');
        }
    }

    fn step1c(&mut self) {
        let len = self.b.len();
        if self.ends("y") && self.has_vowel(len - 1) {
            self.b[len - 1] = b'i';
        }
    }

    /// Steps 2 and 3: the first matching suffix decides, replaced only when m > 0.
    fn apply_table(&mut self, table: &[(&str, &str)]) {
        for (suffix, replacement) in table {
            if self.ends(suffix) {
                if self.measure(self.stem_len(suffix)) > 0 {
                    self.replace_suffix(suffix, replacement);
                }
                return;
            }
        }
    }

    fn step4(&mut self) {
        for suffix in STEP4_SUFFIXES {
            if self.ends(suffix) {
                let stem = self.stem_len(suffix);
                let removable = self.measure(stem) > 1
                    && (*suffix != "ion"
                        || (stem > 0 && matches!(self.b[stem - 1], b's' | b't')));
                if removable {
                    self.b.truncate(stem);
                }
                return;
            }
        }
    }

    fn step5(&mut self) {
        if self.ends("e") {
            let stem = self.b.len() - 1;
            let m = self.measure(stem);
            if m > 1 || (m == 1 && !self.ends_cvc(stem)) {
                self.b.pop();
            }
        }

        let len = self.b.len();
        if self.ends("l") && self.ends_with_double_consonant(len) && self.measure(len) > 1 {
            self.b.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_stems(cases: &[(&str, &str)]) {
        for (word, expected) in cases {
            assert_eq!(stem(word), *expected, "stem({word})");
        }
    }

    #[test]
    fn test_step1_plurals_and_participles() {
        assert_stems(&[
            ("caresses", "caress"),
            ("ponies", "poni"),
            ("ties", "ti"),
            ("caress", "caress"),
            ("cats", "cat"),
            ("feed", "feed"),
            ("agreed", "agre"),
            ("plastered", "plaster"),
            ("bled", "bled"),
            ("motoring", "motor"),
            ("sing", "sing"),
        ]);
    }

    #[test]
    fn test_step1b_cleanup_rules() {
        assert_stems(&[
            ("conflated", "conflat"),
            ("troubled", "troubl"),
            ("sized", "size"),
            ("hopping", "hop"),
            ("tanned", "tan"),
            ("falling", "fall"),
            ("hissing", "hiss"),
            ("fizzed", "fizz"),
            ("failing", "fail"),
            ("filing", "file"),
        ]);
    }

    #[test]
    fn test_step1c_y_to_i() {
        assert_stems(&[("happy", "happi"), ("sky", "sky")]);
    }

    #[test]
    fn test_steps_2_to_5() {
        assert_stems(&[
            ("relational", "relat"),
            ("conditional", "condit"),
            ("rational", "ration"),
            ("valenci", "valenc"),
            ("digitizer", "digit"),
            ("generalizations", "gener"),
            ("oscillators", "oscil"),
            ("hopeful", "hope"),
            ("goodness", "good"),
            ("revival", "reviv"),
            ("allowance", "allow"),
            ("inference", "infer"),
            ("airliner", "airlin"),
            ("adjustable", "adjust"),
            ("adoption", "adopt"),
            ("effective", "effect"),
            ("bowdlerize", "bowdler"),
            ("probate", "probat"),
            ("rate", "rate"),
            ("cease", "ceas"),
            ("controll", "control"),
            ("roll", "roll"),
        ]);
    }

    #[test]
    fn test_resume_vocabulary() {
        assert_stems(&[
            ("experienced", "experienc"),
            ("building", "build"),
            ("apis", "api"),
            ("databases", "databas"),
            ("engineer", "engin"),
            ("engineering", "engin"),
            ("developing", "develop"),
            ("development", "develop"),
            ("management", "manag"),
            ("kubernetes", "kubernet"),
            ("postgresql", "postgresql"),
        ]);
    }

    #[test]
    fn test_short_and_non_ascii_words_unchanged() {
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("go"), "go");
        assert_eq!(stem("café"), "café");
        assert_eq!(stem(""), "");
    }

    #[test]
    fn test_digits_pass_through() {
        assert_eq!(stem("2024"), "2024");
        assert_eq!(stem("s3"), "s3");
    }
}
