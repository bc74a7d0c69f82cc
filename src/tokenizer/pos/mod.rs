// Part-of-speech tagging
// Unknown tokens are replaced by a placeholder naming their part of speech,
// so a tagger only needs to be roughly right. The built-in one uses
// closed-class word lists, suffixes and the previous tag.

#[cfg(test)]
mod tests;

use std::fmt;

/// Universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    Verb,
    Adj,
    Adv,
    Num,
    Det,
    Pron,
    Adp,
    Conj,
    Prt,
    Punct,
    X,
}

impl PosTag {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "NOUN",
            Self::Verb => "VERB",
            Self::Adj => "ADJ",
            Self::Adv => "ADV",
            Self::Num => "NUM",
            Self::Det => "DET",
            Self::Pron => "PRON",
            Self::Adp => "ADP",
            Self::Conj => "CONJ",
            Self::Prt => "PRT",
            Self::Punct => "PUNCT",
            Self::X => "X",
        }
    }

    /// The token an unknown word is replaced with, e.g. `<NOUN>`
    #[inline]
    pub fn placeholder(&self) -> String {
        format!("<{}>", self.as_str())
    }
}

impl fmt::Display for PosTag {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait PosTagger {
    /// Tag every token of a sequence; the result has one tag per token
    fn tag(&self, tokens: &[String]) -> Vec<PosTag>;
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "all", "both", "either", "neither", "another",
];
const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
    "whose", "what", "which", "someone", "something", "anyone", "anything", "everyone",
    "everything", "nobody", "nothing",
];
const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "into", "onto", "over", "under",
    "about", "against", "between", "through", "during", "before", "after", "above", "below",
    "without", "within", "upon", "across", "behind", "beyond", "near", "per", "since", "until",
    "toward", "towards", "among", "around", "like",
];
const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "yet", "so", "because", "although", "though", "while", "if",
    "unless", "whether", "whereas",
];
const PARTICLES: &[&str] = &["to", "not", "n't", "'s", "up", "off", "out"];
const ADVERBS: &[&str] = &[
    "very", "too", "also", "then", "there", "here", "now", "never", "always", "often", "again",
    "just", "only", "still", "even", "soon", "once", "instead", "however", "almost", "quite",
    "rather", "ever", "already",
];
const AUXILIARIES: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "have", "has",
    "had", "will", "would", "can", "could", "shall", "should", "may", "might", "must",
];
const MODALS: &[&str] = &[
    "do", "does", "did", "will", "would", "can", "could", "shall", "should", "may", "might",
    "must",
];
const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
    "hundred", "thousand", "million", "billion",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "ical", "ic", "less", "ish", "ary", "est",
];
const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise", "ify"];

/// Tagger built from word lists and suffix rules
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    fn closed_class(token: &str) -> Option<PosTag> {
        let in_list = |list: &[&str]| list.contains(&token);
        if in_list(DETERMINERS) {
            Some(PosTag::Det)
        } else if in_list(PRONOUNS) {
            Some(PosTag::Pron)
        } else if in_list(PARTICLES) {
            Some(PosTag::Prt)
        } else if in_list(ADPOSITIONS) {
            Some(PosTag::Adp)
        } else if in_list(CONJUNCTIONS) {
            Some(PosTag::Conj)
        } else if in_list(AUXILIARIES) {
            Some(PosTag::Verb)
        } else if in_list(ADVERBS) {
            Some(PosTag::Adv)
        } else if in_list(NUMBER_WORDS) {
            Some(PosTag::Num)
        } else {
            None
        }
    }

    fn tag_token(token: &str, previous: Option<(&str, PosTag)>) -> PosTag {
        let lower = token.to_lowercase();
        let token = lower.as_str();

        if !token.chars().any(char::is_alphanumeric) {
            return PosTag::Punct;
        }
        if token.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return PosTag::Num;
        }
        if token.chars().any(|c| c.is_ascii_digit()) {
            return PosTag::X;
        }
        if let Some(tag) = Self::closed_class(token) {
            return tag;
        }
        if token.split('-').all(|part| NUMBER_WORDS.contains(&part)) {
            return PosTag::Num;
        }

        // "to <word>" and "<modal> <word>" are verbs
        if let Some((prev_token, _)) = previous {
            let after_infinitive = prev_token == "to" || MODALS.contains(&prev_token);
            if after_infinitive && !token.ends_with("ly") {
                return PosTag::Verb;
            }
        }

        let has_suffix = |suffixes: &[&str]| {
            suffixes
                .iter()
                .any(|suffix| token.len() > suffix.len() + 2 && token.ends_with(suffix))
        };
        if has_suffix(&["ly"]) {
            PosTag::Adv
        } else if has_suffix(ADJECTIVE_SUFFIXES) {
            PosTag::Adj
        } else if has_suffix(VERB_SUFFIXES) {
            match previous {
                // "the burning" reads as a noun, "a cursed" as an adjective
                Some((_, PosTag::Det)) if token.ends_with("ing") => PosTag::Noun,
                Some((_, PosTag::Det)) => PosTag::Adj,
                _ => PosTag::Verb,
            }
        } else {
            PosTag::Noun
        }
    }
}

impl PosTagger for HeuristicTagger {
    #[inline]
    fn tag(&self, tokens: &[String]) -> Vec<PosTag> {
        let mut tags: Vec<PosTag> = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let previous = i
                .checked_sub(1)
                .and_then(|j| Some((tokens.get(j)?.as_str(), *tags.get(j)?)));
            tags.push(Self::tag_token(token, previous));
        }
        tags
    }
}
