use super::ContentError;
use crate::systems::effects::Rng;

/// One-stroke characters.
pub const HIRAGANA_LEVEL1: &[&str] = &["し", "つ", "く", "へ", "の", "こ", "て", "り"];

/// Two-stroke characters.
pub const HIRAGANA_LEVEL2: &[&str] = &[
    "い", "う", "ち", "に", "は", "ひ", "ふ", "み", "も", "ら", "る", "れ", "ろ", "ん",
];

/// Characters of three or more strokes.
pub const HIRAGANA_LEVEL3: &[&str] = &[
    "あ", "お", "か", "き", "け", "さ", "す", "せ", "そ", "た", "と", "な", "ぬ", "ね", "ほ",
    "ま", "む", "め", "や", "ゆ", "よ", "わ", "を",
];

/// Levels are numbered with a `u8`, starting at 1.
pub const MAX_LEVELS: usize = u8::MAX as usize;

/// Questions asked per pass through a level.
pub const QUESTIONS_PER_LEVEL: usize = 5;

/// Candidate characters for one difficulty level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPool {
    /// 1-based difficulty level.
    pub level: u8,
    glyphs: Vec<String>,
}

impl CharacterPool {
    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// All difficulty levels, easiest first. The level count is the pool count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterPools {
    pools: Vec<CharacterPool>,
}

impl CharacterPools {
    pub fn builtin() -> Self {
        let pools = [HIRAGANA_LEVEL1, HIRAGANA_LEVEL2, HIRAGANA_LEVEL3]
            .iter()
            .enumerate()
            .map(|(i, glyphs)| CharacterPool {
                level: (i + 1) as u8,
                glyphs: glyphs.iter().map(|g| g.to_string()).collect(),
            })
            .collect();
        Self { pools }
    }

    /// Build from per-level glyph lists, easiest first.
    pub fn new(levels: Vec<Vec<String>>) -> Result<Self, ContentError> {
        if levels.is_empty() {
            return Err(ContentError::NoPools);
        }
        if levels.len() > MAX_LEVELS {
            return Err(ContentError::TooManyPools {
                count: levels.len(),
                max: MAX_LEVELS,
            });
        }
        let mut pools = Vec::with_capacity(levels.len());
        for (i, glyphs) in levels.into_iter().enumerate() {
            // Bounded by MAX_LEVELS above.
            let level = (i + 1) as u8;
            if glyphs.is_empty() {
                return Err(ContentError::EmptyPool { level });
            }
            pools.push(CharacterPool { level, glyphs });
        }
        Ok(Self { pools })
    }

    /// Parse a JSON array of glyph arrays, e.g. `[["し","つ"],["い","う"]]`.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let levels: Vec<Vec<String>> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Pool for a 1-based level.
    pub fn pool(&self, level: u8) -> Option<&CharacterPool> {
        let idx = (level as usize).checked_sub(1)?;
        self.pools.get(idx)
    }

    pub fn level_count(&self) -> u8 {
        self.pools.len() as u8
    }
}

impl Default for CharacterPools {
    fn default() -> Self {
        Self::builtin()
    }
}

/// The characters asked in one pass through a level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSet {
    glyphs: Vec<String>,
}

impl QuestionSet {
    /// Shuffle a copy of the pool (Fisher–Yates) and keep the first
    /// `QUESTIONS_PER_LEVEL`. No character repeats.
    pub fn sample(pool: &CharacterPool, rng: &mut Rng) -> Self {
        let mut glyphs = pool.glyphs.clone();
        rng.shuffle(&mut glyphs);
        glyphs.truncate(QUESTIONS_PER_LEVEL);
        Self { glyphs }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.glyphs.get(index).map(String::as_str)
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_pool_sizes() {
        let pools = CharacterPools::builtin();
        assert_eq!(pools.level_count(), 3);
        assert_eq!(pools.pool(1).unwrap().len(), 8);
        assert_eq!(pools.pool(2).unwrap().len(), 14);
        assert_eq!(pools.pool(3).unwrap().len(), 23);
        assert!(pools.pool(0).is_none());
        assert!(pools.pool(4).is_none());
    }

    #[test]
    fn pools_do_not_overlap() {
        let mut seen = HashSet::new();
        for glyph in HIRAGANA_LEVEL1.iter().chain(HIRAGANA_LEVEL2).chain(HIRAGANA_LEVEL3) {
            assert!(seen.insert(*glyph), "duplicate glyph '{glyph}'");
        }
    }

    #[test]
    fn question_set_has_five_distinct_pool_members() {
        let pools = CharacterPools::builtin();
        for seed in 1..50 {
            let mut rng = Rng::new(seed);
            for level in 1..=3 {
                let pool = pools.pool(level).unwrap();
                let set = QuestionSet::sample(pool, &mut rng);
                assert_eq!(set.len(), QUESTIONS_PER_LEVEL);
                let unique: HashSet<_> = set.glyphs().iter().collect();
                assert_eq!(unique.len(), QUESTIONS_PER_LEVEL, "seed {seed} level {level}");
                assert!(set.glyphs().iter().all(|g| pool.glyphs().contains(g)));
            }
        }
    }

    #[test]
    fn small_pool_yields_short_set() {
        let pools = CharacterPools::new(vec![vec!["あ".into(), "い".into()]]).unwrap();
        let set = QuestionSet::sample(pools.pool(1).unwrap(), &mut Rng::new(5));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn parse_pools_json() {
        let pools = CharacterPools::from_json(r#"[["し", "つ"], ["い"]]"#).unwrap();
        assert_eq!(pools.level_count(), 2);
        assert_eq!(pools.pool(2).unwrap().glyphs(), &["い".to_string()]);
    }

    #[test]
    fn level_count_is_capped() {
        let pools = CharacterPools::new((0..MAX_LEVELS).map(|_| vec!["あ".into()]).collect()).unwrap();
        assert_eq!(pools.level_count(), 255);
        assert_eq!(pools.pool(255).unwrap().level, 255);

        let too_many = CharacterPools::new((0..=MAX_LEVELS).map(|_| vec!["あ".into()]).collect());
        assert!(matches!(
            too_many,
            Err(ContentError::TooManyPools { count: 256, max: 255 })
        ));
    }

    #[test]
    fn empty_pool_rejected() {
        assert!(matches!(
            CharacterPools::from_json(r#"[["し"], []]"#),
            Err(ContentError::EmptyPool { level: 2 })
        ));
        assert!(matches!(
            CharacterPools::from_json("[]"),
            Err(ContentError::NoPools)
        ));
    }
}
