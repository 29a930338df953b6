//! Token population: one physical drop-object per unit of weight.
//!
//! An entry with weight `n` contributes `n` tokens, so every token carries
//! a uniform `1/total` chance and heavier entries win by multiplicity, not
//! by any bias in the physics. Token ↔ owner resolution goes through a side
//! table keyed by collider handle — handles are unique where names are not.

use std::collections::HashMap;

use glam::Vec2;
use rand::Rng;
use tumble::{BallParams, BodyId, ColliderId, RenderHint, World};

use crate::config::RaffleConfig;
use crate::entry::Entry;

/// Fixed color palette assigned to entries round-robin by entry index.
pub const PALETTE: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FECA57", "#FF9FF3", "#54A0FF", "#5F27CD",
    "#FD7272", "#AAB8C2", "#EE5A6F", "#FFC048",
];

/// Stroke color shared by every un-highlighted token.
pub const TOKEN_STROKE: &str = "#FFFFFF";

/// One physical token: a dynamic ball owned by exactly one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Handle of the token's rigid body in the run's world.
    pub body: BodyId,
    /// Handle of the token's collider (the key for contact resolution).
    pub collider: ColliderId,
    /// Name of the owning entry. Several tokens may share one owner.
    pub owner: String,
    /// Index into [`PALETTE`], assigned per entry.
    pub color_index: usize,
}

/// The full token population of one run, with a collider-keyed side table.
#[derive(Debug, Default)]
pub struct TokenSet {
    tokens: Vec<Token>,
    by_collider: HashMap<ColliderId, usize>,
}

impl TokenSet {
    /// Expands `entries` into tokens and registers them in `world`.
    ///
    /// Tokens are created in entry order, `weight` tokens per entry, each
    /// as a circular dynamic body at a fresh spawn point above the arena.
    /// Entry `i` gets fill color `PALETTE[i % PALETTE.len()]`.
    pub fn spawn<R: Rng>(
        world: &mut World,
        entries: &[Entry],
        config: &RaffleConfig,
        rng: &mut R,
    ) -> Self {
        let mut tokens = Vec::new();
        let mut by_collider = HashMap::new();

        for (index, entry) in entries.iter().enumerate() {
            let color_index = index % PALETTE.len();
            for _ in 0..entry.weight {
                let (body, collider) = world.spawn_ball(&BallParams {
                    position: spawn_point(config, rng),
                    radius: config.ball_radius,
                    restitution: config.restitution,
                    friction: config.friction,
                    hint: RenderHint::new(PALETTE[color_index], TOKEN_STROKE, 2.0),
                });
                by_collider.insert(collider, tokens.len());
                tokens.push(Token {
                    body,
                    collider,
                    owner: entry.name.clone(),
                    color_index,
                });
            }
        }

        Self {
            tokens,
            by_collider,
        }
    }

    /// Number of tokens in the population.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no tokens exist.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates tokens in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter()
    }

    /// Resolves a contact-reported collider back to its token, if the
    /// collider belongs to this population.
    #[must_use]
    pub fn token_for(&self, collider: ColliderId) -> Option<&Token> {
        self.by_collider
            .get(&collider)
            .and_then(|&index| self.tokens.get(index))
    }
}

/// Samples a spawn point: uniform x inside the margins, y in a randomized
/// band above the visible arena (and above every obstacle).
pub fn spawn_point<R: Rng>(config: &RaffleConfig, rng: &mut R) -> Vec2 {
    let x = rng.gen_range(config.spawn_margin..=config.width - config.spawn_margin);
    let y = config.height + config.spawn_clearance + rng.gen_range(0.0..config.spawn_band);
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spawn_set(entries: &[Entry], seed: u64) -> (World, TokenSet) {
        let config = RaffleConfig::default();
        let mut world = World::new(Vec2::new(0.0, config.gravity_y), config.dt);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let set = TokenSet::spawn(&mut world, entries, &config, &mut rng);
        (world, set)
    }

    #[test]
    fn token_count_equals_weight_sum() {
        let entries = vec![
            Entry::new("a", 5),
            Entry::new("b", 10),
            Entry::new("c", 3),
            Entry::new("d", 7),
        ];
        let (_, set) = spawn_set(&entries, 42);
        assert_eq!(set.len(), 25);
    }

    #[test]
    fn each_entry_contributes_exactly_weight_tokens() {
        let entries = vec![Entry::new("a", 4), Entry::new("b", 2)];
        let (_, set) = spawn_set(&entries, 42);

        let a_tokens = set.iter().filter(|t| t.owner == "a").count();
        let b_tokens = set.iter().filter(|t| t.owner == "b").count();
        assert_eq!(a_tokens, 4);
        assert_eq!(b_tokens, 2);
    }

    #[test]
    fn colors_follow_entry_order() {
        // "A*2\nB*1" → colors [0, 0, 1] in creation order.
        let entries = vec![Entry::new("A", 2), Entry::new("B", 1)];
        let (_, set) = spawn_set(&entries, 42);

        let colors: Vec<_> = set.iter().map(|t| t.color_index).collect();
        assert_eq!(colors, vec![0, 0, 1]);
    }

    #[test]
    fn palette_wraps_after_twelve_entries() {
        let entries: Vec<_> = (0..14).map(|i| Entry::new(&format!("e{i}"), 1)).collect();
        let (_, set) = spawn_set(&entries, 42);

        let colors: Vec<_> = set.iter().map(|t| t.color_index).collect();
        assert_eq!(colors[12], 0);
        assert_eq!(colors[13], 1);
    }

    #[test]
    fn tokens_spawn_above_arena_inside_margins() {
        let config = RaffleConfig::default();
        let entries = vec![Entry::new("a", 20)];
        let (world, set) = spawn_set(&entries, 7);

        for token in set.iter() {
            let pos = world.position(token.body).unwrap();
            assert!(pos.x >= config.spawn_margin);
            assert!(pos.x <= config.width - config.spawn_margin);
            assert!(pos.y > config.height, "token spawned inside arena: {pos:?}");
        }
    }

    #[test]
    fn token_for_resolves_by_collider() {
        let entries = vec![Entry::new("a", 1), Entry::new("b", 1)];
        let (_, set) = spawn_set(&entries, 42);

        let second = set.iter().nth(1).unwrap().clone();
        let found = set.token_for(second.collider).unwrap();
        assert_eq!(found.owner, "b");
        assert_eq!(found.body, second.body);
    }

    #[test]
    fn token_for_unknown_collider_is_none() {
        let entries = vec![Entry::new("a", 1)];
        let (_, set) = spawn_set(&entries, 42);
        let (_, other_set) = spawn_set(&entries, 43);

        let foreign = other_set.iter().next().unwrap().collider;
        assert!(set.token_for(foreign).is_none());
    }

    #[test]
    fn same_seed_same_spawn_layout() {
        let entries = vec![Entry::new("a", 8)];
        let (world1, set1) = spawn_set(&entries, 99);
        let (world2, set2) = spawn_set(&entries, 99);

        let positions1: Vec<_> = set1.iter().map(|t| world1.position(t.body).unwrap()).collect();
        let positions2: Vec<_> = set2.iter().map(|t| world2.position(t.body).unwrap()).collect();
        assert_eq!(positions1, positions2);
    }

    #[test]
    fn different_seeds_differ() {
        let entries = vec![Entry::new("a", 8)];
        let (world1, set1) = spawn_set(&entries, 1);
        let (world2, set2) = spawn_set(&entries, 2);

        let positions1: Vec<_> = set1.iter().map(|t| world1.position(t.body).unwrap()).collect();
        let positions2: Vec<_> = set2.iter().map(|t| world2.position(t.body).unwrap()).collect();
        assert_ne!(positions1, positions2);
    }
}
