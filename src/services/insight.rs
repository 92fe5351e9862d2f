use serde::{Deserialize, Serialize};

/// Qualitative engagement level keyed by like count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InsightTier {
    LowVisibility,
    NewOrNiche,
    Moderate,
    Good,
    Strong,
    Viral,
    VeryViral,
    Explosive,
    UltraViral,
}

impl InsightTier {
    pub const ALL: [InsightTier; 9] = [
        InsightTier::LowVisibility,
        InsightTier::NewOrNiche,
        InsightTier::Moderate,
        InsightTier::Good,
        InsightTier::Strong,
        InsightTier::Viral,
        InsightTier::VeryViral,
        InsightTier::Explosive,
        InsightTier::UltraViral,
    ];

    pub fn from_likes(likes: u64) -> Self {
        match likes {
            0..=99 => InsightTier::LowVisibility,
            100..=999 => InsightTier::NewOrNiche,
            1_000..=9_999 => InsightTier::Moderate,
            10_000..=49_999 => InsightTier::Good,
            50_000..=89_999 => InsightTier::Strong,
            90_000..=199_999 => InsightTier::Viral,
            200_000..=499_999 => InsightTier::VeryViral,
            500_000..=999_999 => InsightTier::Explosive,
            _ => InsightTier::UltraViral,
        }
    }

    /// Inclusive lower bound of the tier.
    pub fn min_likes(self) -> u64 {
        match self {
            InsightTier::LowVisibility => 0,
            InsightTier::NewOrNiche => 100,
            InsightTier::Moderate => 1_000,
            InsightTier::Good => 10_000,
            InsightTier::Strong => 50_000,
            InsightTier::Viral => 90_000,
            InsightTier::VeryViral => 200_000,
            InsightTier::Explosive => 500_000,
            InsightTier::UltraViral => 1_000_000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InsightTier::LowVisibility => "Low visibility",
            InsightTier::NewOrNiche => "New or niche content",
            InsightTier::Moderate => "Moderate engagement",
            InsightTier::Good => "Good performance",
            InsightTier::Strong => "Strong content",
            InsightTier::Viral => "Viral reel",
            InsightTier::VeryViral => "Very viral",
            InsightTier::Explosive => "Explosive reach",
            InsightTier::UltraViral => "Ultra-viral content",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            InsightTier::LowVisibility => {
                "Possibly just posted or missing hashtags, reach is very limited."
            }
            InsightTier::NewOrNiche => {
                "Likely a small follower base or content yet to be discovered."
            }
            InsightTier::Moderate => {
                "Might be reaching a specific audience with decent interaction."
            }
            InsightTier::Good => {
                "Likely helped by relevant hashtags, appealing visuals or a semi-viral push."
            }
            InsightTier::Strong => {
                "Possibly using trending audio, good editing, or posted at the right time."
            }
            InsightTier::Viral => {
                "High engagement and visibility, possibly featured in explore or trending."
            }
            InsightTier::VeryViral => {
                "Massive reach, likely boosted by shares, high retention or a celebrity creator."
            }
            InsightTier::Explosive => {
                "Global audience impact, frequently reshared, possibly trending cross-platform."
            }
            InsightTier::UltraViral => {
                "Mega influencer or cultural moment, the top 1% of reels on the platform."
            }
        }
    }
}

impl std::fmt::Display for InsightTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_map_to_adjacent_tiers() {
        let cases = [
            (0, InsightTier::LowVisibility),
            (99, InsightTier::LowVisibility),
            (100, InsightTier::NewOrNiche),
            (999, InsightTier::NewOrNiche),
            (1_000, InsightTier::Moderate),
            (9_999, InsightTier::Moderate),
            (10_000, InsightTier::Good),
            (49_999, InsightTier::Good),
            (50_000, InsightTier::Strong),
            (89_999, InsightTier::Strong),
            (90_000, InsightTier::Viral),
            (199_999, InsightTier::Viral),
            (200_000, InsightTier::VeryViral),
            (499_999, InsightTier::VeryViral),
            (500_000, InsightTier::Explosive),
            (999_999, InsightTier::Explosive),
            (1_000_000, InsightTier::UltraViral),
            (u64::MAX, InsightTier::UltraViral),
        ];

        for (likes, tier) in cases {
            assert_eq!(InsightTier::from_likes(likes), tier, "likes = {likes}");
        }
    }

    #[test]
    fn lower_bounds_agree_with_mapping() {
        for pair in InsightTier::ALL.windows(2) {
            let (low, high) = (pair[0], pair[1]);
            assert!(low.min_likes() < high.min_likes());
            assert_eq!(InsightTier::from_likes(low.min_likes()), low);
            assert_eq!(InsightTier::from_likes(high.min_likes() - 1), low);
        }
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<_> = InsightTier::ALL.iter().map(|t| t.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), 9);
        assert_eq!(InsightTier::from_likes(1_500).to_string(), "Moderate engagement");
    }
}
