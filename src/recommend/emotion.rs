use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Mixed,
}

impl Emotion {
    pub const ALL: [Emotion; 4] = [Emotion::Happy, Emotion::Sad, Emotion::Angry, Emotion::Mixed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Mixed => "mixed",
        }
    }

    /// Fixed genre keywords. `Mixed` has none here; it takes the
    /// dataset's genre universe instead.
    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Emotion::Happy => &["comedy", "animation", "music", "romance", "fantasy"],
            Emotion::Sad => &["drama", "biography", "history", "war"],
            Emotion::Angry => &["action", "thriller", "crime"],
            Emotion::Mixed => &[],
        }
    }
}

impl FromStr for Emotion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Emotion::Happy),
            "sad" => Ok(Emotion::Sad),
            "angry" => Ok(Emotion::Angry),
            "mixed" => Ok(Emotion::Mixed),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emotion label to genre tokens lookup.
#[derive(Debug, Clone)]
pub struct EmotionMap {
    happy: Vec<String>,
    sad: Vec<String>,
    angry: Vec<String>,
    mixed: Vec<String>,
}

impl EmotionMap {
    pub fn new(genre_universe: &BTreeSet<String>) -> Self {
        let fixed = |e: Emotion| -> Vec<String> {
            e.keywords().iter().map(|g| g.to_string()).collect()
        };
        Self {
            happy: fixed(Emotion::Happy),
            sad: fixed(Emotion::Sad),
            angry: fixed(Emotion::Angry),
            mixed: genre_universe.iter().cloned().collect(),
        }
    }

    pub fn genres(&self, emotion: Emotion) -> &[String] {
        match emotion {
            Emotion::Happy => &self.happy,
            Emotion::Sad => &self.sad,
            Emotion::Angry => &self.angry,
            Emotion::Mixed => &self.mixed,
        }
    }

    /// Genre tokens for an emotion label; empty for unknown labels.
    pub fn genres_for(&self, emotion: &str) -> &[String] {
        match emotion.parse::<Emotion>() {
            Ok(e) => self.genres(e),
            Err(()) => &[],
        }
    }
}
