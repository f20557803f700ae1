//! The draw engine
//!
//! Owns the participant and prize pools, the rule, the free-form remaining
//! pool and every draw result. All mutation goes through `&mut self`, and a
//! draw is fully committed before it returns.

use std::collections::HashSet;

use uuid::Uuid;

use super::random::{RandomSource, ThreadRandom};
use super::rarity::RarityWeights;
use super::rule::{Rule, RulePatch};
use super::session::{DrawCard, DrawOutcome, DrawSession, WinnerRecord};
use crate::config::settings::MAX_BATCH_SIZE;
use crate::config::{DrawMode, LabelSettings, Settings};
use crate::pool::{Participant, Pool, Prize, PrizeTemplate};
use crate::storage::Snapshot;

/// Lucky-draw engine
pub struct DrawEngine {
    mode: DrawMode,
    batch_size: usize,
    free_form_cap: Option<usize>,
    rarity_weights: RarityWeights,
    default_rule: Rule,
    prize_template: PrizeTemplate,
    labels: LabelSettings,

    participants: Pool<Participant>,
    prizes: Pool<Prize>,
    /// Names still eligible for free-form draws
    remaining: Vec<String>,
    rule: Rule,
    /// Newest first
    sessions: Vec<DrawSession>,
    /// Oldest first
    winner_records: Vec<WinnerRecord>,
    selected_card: Option<Uuid>,

    rng: Box<dyn RandomSource>,
}

impl DrawEngine {
    /// Create an empty engine backed by the thread-local generator
    pub fn new(settings: &Settings) -> Self {
        Self::with_random(settings, Box::new(ThreadRandom::new()))
    }

    /// Create an empty engine with a specific random source
    pub fn with_random(settings: &Settings, rng: Box<dyn RandomSource>) -> Self {
        Self {
            mode: settings.mode,
            batch_size: settings.batch_size.clamp(1, MAX_BATCH_SIZE),
            free_form_cap: settings.free_form_cap.filter(|cap| *cap > 0),
            rarity_weights: settings.rarity_weights,
            default_rule: settings.default_rule.clone(),
            prize_template: settings.prize_template.clone(),
            labels: settings.labels.clone(),
            participants: Pool::new(),
            prizes: Pool::new(),
            remaining: Vec::new(),
            rule: settings.default_rule.clone(),
            sessions: Vec::new(),
            winner_records: Vec::new(),
            selected_card: None,
            rng,
        }
    }

    /// Replace the random source
    pub fn set_random_source(&mut self, rng: Box<dyn RandomSource>) {
        self.rng = rng;
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    // ---- Pool management -------------------------------------------------

    /// Add one participant; returns whether the pool changed
    pub fn add_participant(&mut self, name: &str) -> bool {
        let added = self
            .participants
            .insert_with(name, Participant::new)
            .map(|p| p.name.clone());

        match added {
            Some(name) => {
                log::debug!("Added participant {}", name);
                self.remaining.push(name);
                true
            }
            None => false,
        }
    }

    /// Add many participants; returns how many were new
    pub fn add_participants<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = self.participants.extend_with(names, Participant::new);
        if !added.is_empty() {
            log::debug!("Added {} participants", added.len());
        }
        let count = added.len();
        self.remaining.extend(added);
        count
    }

    /// Replace the whole participant list and refill the remaining pool
    pub fn replace_participants<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.participants.clear();
        self.participants.extend_with(names, Participant::new);
        self.remaining = self.participants.names();
        log::info!("Participant list replaced ({} names)", self.participants.len());
        self.participants.len()
    }

    /// Add one prize; returns whether the pool changed
    pub fn add_prize(&mut self, name: &str) -> bool {
        let template = &self.prize_template;
        self.prizes
            .insert_with(name, |name| Prize::new(name, template))
            .is_some()
    }

    /// Add many prizes; returns how many were new
    pub fn add_prizes<I, S>(&mut self, names: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let template = &self.prize_template;
        self.prizes
            .extend_with(names, |name| Prize::new(name, template))
            .len()
    }

    pub fn update_rule(&mut self, patch: RulePatch) {
        self.rule.apply(patch);
        log::debug!("Rule updated: {:?}", self.rule);
    }

    /// Make every participant eligible for free-form draws again
    pub fn reset_remaining(&mut self) {
        self.remaining = self.participants.names();
    }

    /// Clear pools, history and selection, and restore the default rule
    pub fn reset(&mut self) {
        self.participants.clear();
        self.prizes.clear();
        self.remaining.clear();
        self.sessions.clear();
        self.winner_records.clear();
        self.selected_card = None;
        self.rule = self.default_rule.clone();
        log::info!("Raffle state reset");
    }

    // ---- Drawing ---------------------------------------------------------

    /// Run a draw in the configured mode
    pub fn draw(&mut self) -> DrawOutcome {
        match self.mode {
            DrawMode::Batch => DrawOutcome::Session(self.draw_batch()),
            DrawMode::FreeForm => self
                .draw_free_form()
                .map_or(DrawOutcome::Empty, DrawOutcome::Winners),
        }
    }

    /// Draw a full batch of slots
    ///
    /// Winning slots are a uniform subset of the batch; winners are sampled
    /// without replacement from the participant pool. The new session is
    /// prepended to history and its first card becomes the selection.
    pub fn draw_batch(&mut self) -> DrawSession {
        let prize_source: Vec<Prize> = if self.prizes.is_empty() {
            vec![Prize::placeholder(
                self.rule.prize_label(&self.labels.fallback_prize),
                &self.prize_template,
            )]
        } else {
            self.prizes.to_vec()
        };

        let mut working = self.participants.names();
        let winner_count = self.rule.batch_winner_count(self.batch_size, working.len());
        let winning_slots = pick_winning_slots(self.rng.as_mut(), self.batch_size, winner_count);

        let mut cards = Vec::with_capacity(self.batch_size);
        for is_winning in winning_slots {
            let card = if is_winning && !working.is_empty() {
                let winner = working.remove(self.rng.pick_index(working.len()));
                let prize = &prize_source[self.rng.pick_index(prize_source.len())];
                let rarity = self.rarity_weights.sample(self.rng.as_mut());
                DrawCard::winning(winner, prize, rarity)
            } else {
                DrawCard::thank_you(&self.labels.thank_you, &self.prize_template)
            };
            cards.push(card);
        }

        let session = DrawSession::new(cards);
        log::info!(
            "Batch draw {}: {} of {} slots won",
            session.id,
            session.winner_count(),
            self.batch_size
        );

        if self.rule.remove_winner {
            let winners: HashSet<&str> = session.winner_names().into_iter().collect();
            let removed = self.participants.remove_names(&winners);
            self.remaining.retain(|name| !winners.contains(name.as_str()));
            log::debug!("Removed {} winners from the pool", removed);
        }

        self.selected_card = session.cards.first().map(|card| card.id);
        self.sessions.insert(0, session.clone());
        session
    }

    /// Draw names from the remaining pool
    ///
    /// Returns `None`, and records nothing, when the remaining pool is empty.
    pub fn draw_free_form(&mut self) -> Option<WinnerRecord> {
        let count = self
            .rule
            .free_form_winner_count(self.free_form_cap, self.remaining.len());
        if count == 0 {
            log::info!("Remaining pool is empty, nothing to draw");
            return None;
        }

        let mut candidates = self.remaining.clone();
        let mut names = Vec::with_capacity(count);
        for _ in 0..count {
            let idx = self.rng.pick_index(candidates.len());
            names.push(candidates.remove(idx));
        }

        let record = WinnerRecord::new(self.rule.prize_name.trim().to_string(), names);
        log::info!(
            "Free-form draw for {:?}: {} winners",
            record.prize,
            record.names.len()
        );

        if self.rule.remove_winner {
            let drawn: HashSet<&str> = record.names.iter().map(String::as_str).collect();
            self.remaining.retain(|name| !drawn.contains(name.as_str()));
        }

        self.winner_records.push(record.clone());
        Some(record)
    }

    // ---- Selection -------------------------------------------------------

    /// Select a card from any session; returns false for unknown ids
    pub fn select_card(&mut self, card_id: Uuid) -> bool {
        if self.find_card(card_id).is_some() {
            self.selected_card = Some(card_id);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_card = None;
    }

    pub fn selected_card(&self) -> Option<&DrawCard> {
        self.selected_card.and_then(|id| self.find_card(id))
    }

    /// The card a detail view should show: the selection, else the first
    /// card of the latest session
    pub fn featured_card(&self) -> Option<&DrawCard> {
        self.selected_card()
            .or_else(|| self.last_session().and_then(|s| s.cards.first()))
    }

    fn find_card(&self, card_id: Uuid) -> Option<&DrawCard> {
        self.sessions.iter().find_map(|session| session.card(card_id))
    }

    // ---- Accessors -------------------------------------------------------

    pub fn participants(&self) -> &[Participant] {
        self.participants.as_slice()
    }

    pub fn prizes(&self) -> &[Prize] {
        self.prizes.as_slice()
    }

    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn prize_count(&self) -> usize {
        self.prizes.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// Batch sessions, newest first
    pub fn sessions(&self) -> &[DrawSession] {
        &self.sessions
    }

    pub fn last_session(&self) -> Option<&DrawSession> {
        self.sessions.first()
    }

    /// Free-form results, oldest first
    pub fn winner_records(&self) -> &[WinnerRecord] {
        &self.winner_records
    }

    pub fn last_winner_record(&self) -> Option<&WinnerRecord> {
        self.winner_records.last()
    }

    // ---- Persistence -----------------------------------------------------

    /// Copy of the persistent state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            participants: self.participants.to_vec(),
            prizes: self.prizes.to_vec(),
            rule: self.rule.clone(),
            sessions: self.sessions.clone(),
            remaining: Some(self.remaining.clone()),
            winners: self.winner_records.clone(),
            ..Snapshot::default()
        }
    }

    /// Replace state with a restored snapshot; the selection is cleared
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.participants = Pool::from_items(snapshot.participants);
        self.prizes = Pool::from_items(snapshot.prizes);
        self.remaining = match snapshot.remaining {
            Some(names) => self.known_remaining(names),
            None => self.participants.names(),
        };
        self.rule = snapshot.rule;
        self.sessions = snapshot.sessions;
        self.winner_records = snapshot.winners;
        self.selected_card = None;

        log::info!(
            "Restored {} participants, {} prizes, {} sessions",
            self.participants.len(),
            self.prizes.len(),
            self.sessions.len()
        );
    }

    /// Restored remaining names, first copy only and participants only
    fn known_remaining(&self, names: Vec<String>) -> Vec<String> {
        let total = names.len();
        let mut seen = HashSet::new();
        let kept: Vec<String> = names
            .into_iter()
            .filter(|name| self.participants.contains(name) && seen.insert(name.clone()))
            .collect();

        if kept.len() < total {
            log::warn!(
                "Dropped {} duplicate or unknown names while restoring remaining pool",
                total - kept.len()
            );
        }
        kept
    }
}

/// Mark `count` of `slots` positions as winning, uniformly without
/// replacement (partial Fisher-Yates over the slot indices)
fn pick_winning_slots(rng: &mut dyn RandomSource, slots: usize, count: usize) -> Vec<bool> {
    let count = count.min(slots);
    let mut order: Vec<usize> = (0..slots).collect();

    for i in 0..count {
        let j = i + rng.pick_index(slots - i);
        order.swap(i, j);
    }

    let mut mask = vec![false; slots];
    for &slot in &order[..count] {
        mask[slot] = true;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::random::{ScriptedRandom, SeededRandom};
    use crate::draw::rarity::Rarity;

    fn engine_with(settings: Settings, seed: u64) -> DrawEngine {
        DrawEngine::with_random(&settings, Box::new(SeededRandom::new(seed)))
    }

    fn batch_engine(seed: u64) -> DrawEngine {
        engine_with(Settings::ten_pull_preset(), seed)
    }

    fn free_form_engine(seed: u64) -> DrawEngine {
        engine_with(Settings::free_form_preset(), seed)
    }

    #[test]
    fn test_add_participant_rules() {
        let mut engine = batch_engine(1);

        assert!(engine.add_participant("  Alice "));
        assert!(!engine.add_participant("Alice"));
        assert!(!engine.add_participant("   "));
        assert_eq!(engine.add_participants(["Bob", "Alice", "", "Bob", "Carol"]), 2);

        let names: Vec<&str> = engine.participants().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(engine.remaining(), ["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_add_prizes_use_template() {
        let mut engine = batch_engine(1);
        assert!(engine.add_prize("Laptop"));
        assert!(!engine.add_prize(" Laptop "));
        assert_eq!(engine.add_prizes(["Bike", "Laptop", "Phone"]), 2);

        assert_eq!(engine.prize_count(), 3);
        let template = PrizeTemplate::default();
        assert!(engine
            .prizes()
            .iter()
            .all(|p| p.description == template.description && p.image == template.image));
    }

    #[test]
    fn test_ten_pull_clamps_to_pool() {
        let mut engine = batch_engine(7);
        engine.add_participants(["A", "B", "C"]);
        engine.update_rule(RulePatch {
            prize_name: Some("Grand".into()),
            winner_count: Some(10),
            remove_winner: Some(true),
        });

        let session = engine.draw_batch();

        assert_eq!(session.cards.len(), 10);
        let mut winners = session.winner_names();
        winners.sort_unstable();
        assert_eq!(winners, vec!["A", "B", "C"]);
        assert!(session
            .winning_cards()
            .all(|card| card.prize_name == "Grand"));
        assert!(session
            .cards
            .iter()
            .filter(|card| !card.is_winner())
            .all(|card| card.prize_name == "Thanks for participating"
                && card.rarity == Rarity::Common));

        assert_eq!(engine.participant_count(), 0);
        assert_eq!(engine.remaining_count(), 0);
        assert_eq!(engine.last_session(), Some(&session));
        assert_eq!(engine.selected_card(), session.cards.first());
    }

    #[test]
    fn test_batch_respects_winner_count() {
        let mut engine = batch_engine(11);
        engine.add_participants((0..30).map(|i| format!("P{}", i)));
        engine.update_rule(RulePatch::winner_count(4));

        for _ in 0..5 {
            let session = engine.draw_batch();
            assert_eq!(session.cards.len(), 10);
            assert_eq!(session.winner_count(), 4);

            let unique: HashSet<&str> = session.winner_names().into_iter().collect();
            assert_eq!(unique.len(), 4);
        }
        assert_eq!(engine.participant_count(), 10);
        assert_eq!(engine.sessions().len(), 5);
    }

    #[test]
    fn test_batch_caps_at_slot_count() {
        let mut engine = batch_engine(3);
        engine.add_participants((0..25).map(|i| format!("P{}", i)));
        engine.update_rule(RulePatch::winner_count(50));

        let session = engine.draw_batch();
        assert_eq!(session.winner_count(), 10);
    }

    #[test]
    fn test_batch_with_empty_pool() {
        let mut engine = batch_engine(5);
        let session = engine.draw_batch();

        assert_eq!(session.cards.len(), 10);
        assert_eq!(session.winner_count(), 0);
        assert_eq!(session.best_rarity(), None);
    }

    #[test]
    fn test_negative_winner_count_draws_nobody() {
        let mut engine = batch_engine(5);
        engine.add_participants(["A", "B"]);
        engine.update_rule(RulePatch::winner_count(-3));

        let session = engine.draw_batch();
        assert_eq!(session.winner_count(), 0);
        assert_eq!(engine.participant_count(), 2);
    }

    #[test]
    fn test_batch_keeps_winners_without_remove_rule() {
        let mut engine = batch_engine(9);
        engine.add_participants(["A", "B", "C"]);
        engine.update_rule(RulePatch::remove_winner(false));

        engine.draw_batch();
        assert_eq!(engine.participant_count(), 3);
    }

    #[test]
    fn test_scripted_batch_is_exact() {
        let mut engine =
            DrawEngine::with_random(&Settings::default(), Box::new(ScriptedRandom::constant(0.0)));
        engine.add_participants(["A", "B", "C"]);
        engine.add_prizes(["P1", "P2"]);

        let session = engine.draw_batch();

        // Zero rolls pick the first slots, first participants, first prize
        // and the rarest tier.
        assert_eq!(session.winner_names(), vec!["A", "B", "C"]);
        assert!(session.cards[..3].iter().all(|c| c.prize_name == "P1"));
        assert!(session.cards[..3].iter().all(|c| c.rarity == Rarity::SuperRare));
        assert!(session.cards[3..].iter().all(|c| !c.is_winner()));
    }

    #[test]
    fn test_sessions_newest_first() {
        let mut engine = batch_engine(21);
        engine.add_participants((0..40).map(|i| format!("P{}", i)));
        engine.update_rule(RulePatch::winner_count(2));

        let first = engine.draw_batch();
        let second = engine.draw_batch();

        assert_eq!(engine.sessions()[0].id, second.id);
        assert_eq!(engine.sessions()[1].id, first.id);
        assert_eq!(engine.sessions()[1], first);
    }

    #[test]
    fn test_free_form_scenario() {
        let mut engine = free_form_engine(13);
        engine.replace_participants(["A", "B"]);
        engine.update_rule(RulePatch {
            winner_count: Some(5),
            remove_winner: Some(true),
            ..Default::default()
        });

        let record = engine.draw_free_form().expect("two names to draw");
        let mut names = record.names.clone();
        names.sort();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(engine.remaining_count(), 0);
        // The full list is untouched in free-form mode
        assert_eq!(engine.participant_count(), 2);

        assert!(engine.draw_free_form().is_none());
        assert_eq!(engine.draw(), DrawOutcome::Empty);
        assert_eq!(engine.winner_records().len(), 1);
    }

    #[test]
    fn test_free_form_shrinks_remaining() {
        let mut engine = free_form_engine(17);
        engine.replace_participants(["A", "B", "C", "D", "E"]);
        engine.update_rule(RulePatch::winner_count(2));

        let first = engine.draw_free_form().unwrap();
        let second = engine.draw_free_form().unwrap();
        assert_eq!(engine.remaining_count(), 1);

        let all: HashSet<&String> = first.names.iter().chain(&second.names).collect();
        assert_eq!(all.len(), 4);
        assert_eq!(engine.last_winner_record(), Some(&second));

        engine.reset_remaining();
        assert_eq!(engine.remaining_count(), 5);
    }

    #[test]
    fn test_free_form_draws_at_least_one() {
        let mut engine = free_form_engine(19);
        engine.replace_participants(["A", "B", "C"]);
        engine.update_rule(RulePatch::winner_count(0));

        let record = engine.draw_free_form().unwrap();
        assert_eq!(record.names.len(), 1);
    }

    #[test]
    fn test_free_form_without_removal_can_repeat() {
        let mut engine = free_form_engine(23);
        engine.replace_participants(["A"]);
        engine.update_rule(RulePatch::remove_winner(false));

        for _ in 0..3 {
            assert_eq!(engine.draw_free_form().unwrap().names, vec!["A"]);
        }
        assert_eq!(engine.remaining_count(), 1);
    }

    #[test]
    fn test_free_form_cap() {
        let settings = Settings {
            free_form_cap: Some(2),
            ..Settings::free_form_preset()
        };
        let mut engine = engine_with(settings, 29);
        engine.replace_participants(["A", "B", "C", "D"]);
        engine.update_rule(RulePatch::winner_count(4));

        assert_eq!(engine.draw_free_form().unwrap().names.len(), 2);
    }

    #[test]
    fn test_free_form_prize_label_is_trimmed() {
        let mut engine = free_form_engine(31);
        engine.replace_participants(["A"]);
        engine.update_rule(RulePatch::prize_name("  Bike  "));

        assert_eq!(engine.draw_free_form().unwrap().prize, "Bike");
    }

    #[test]
    fn test_draw_dispatches_on_mode() {
        let mut engine = batch_engine(37);
        engine.add_participants(["A", "B"]);
        assert!(matches!(engine.draw(), DrawOutcome::Session(_)));

        engine.set_mode(DrawMode::FreeForm);
        engine.reset_remaining();
        engine.add_participant("C");
        assert!(matches!(engine.draw(), DrawOutcome::Winners(_)));
    }

    #[test]
    fn test_batch_removal_shrinks_remaining() {
        let mut engine = batch_engine(41);
        engine.add_participants(["A", "B", "C"]);
        engine.update_rule(RulePatch::winner_count(1));

        let session = engine.draw_batch();
        let winner = session.winner_names()[0].to_string();
        assert!(!engine.remaining().contains(&winner));
        assert_eq!(engine.remaining_count(), 2);
    }

    #[test]
    fn test_selection() {
        let mut engine = batch_engine(43);
        assert!(engine.selected_card().is_none());
        assert!(engine.featured_card().is_none());

        engine.add_participants(["A", "B"]);
        let session = engine.draw_batch();

        let third = session.cards[2].id;
        assert!(engine.select_card(third));
        assert_eq!(engine.selected_card().map(|c| c.id), Some(third));

        assert!(!engine.select_card(Uuid::new_v4()));
        assert_eq!(engine.selected_card().map(|c| c.id), Some(third));

        engine.clear_selection();
        assert!(engine.selected_card().is_none());
        assert_eq!(engine.featured_card().map(|c| c.id), Some(session.cards[0].id));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut engine = batch_engine(47);
        engine.add_participants(["A", "B"]);
        engine.add_prize("Bike");
        engine.update_rule(RulePatch::winner_count(1));
        engine.draw_batch();

        engine.reset();

        assert_eq!(engine.participant_count(), 0);
        assert_eq!(engine.prize_count(), 0);
        assert_eq!(engine.remaining_count(), 0);
        assert!(engine.sessions().is_empty());
        assert!(engine.last_session().is_none());
        assert!(engine.selected_card().is_none());
        assert_eq!(engine.rule(), &Rule::default());
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut engine = batch_engine(53);
        engine.add_participants(["A", "B", "C"]);
        engine.add_prize("P1");
        engine.update_rule(RulePatch {
            prize_name: Some("X".into()),
            winner_count: Some(2),
            remove_winner: Some(true),
        });

        let json = engine.snapshot().to_json().unwrap();
        let snapshot = Snapshot::from_json(&json, &Rule::default()).unwrap();

        let mut restored = batch_engine(59);
        restored.restore(snapshot);

        assert_eq!(restored.participants(), engine.participants());
        assert_eq!(restored.prizes(), engine.prizes());
        assert_eq!(restored.rule(), engine.rule());
        assert!(restored.sessions().is_empty());
        assert_eq!(restored.remaining(), ["A", "B", "C"]);
    }

    #[test]
    fn test_unusable_settings_are_bounded() {
        let settings = Settings {
            batch_size: usize::MAX,
            free_form_cap: Some(0),
            ..Settings::free_form_preset()
        };
        let mut engine = engine_with(settings, 71);
        assert_eq!(engine.batch_size(), MAX_BATCH_SIZE);

        engine.add_participants(["A", "B"]);
        match engine.draw() {
            DrawOutcome::Winners(record) => assert_eq!(record.names.len(), 1),
            other => panic!("expected winners, got {:?}", other),
        }
        assert_eq!(engine.remaining_count(), 1);
    }

    #[test]
    fn test_restore_cleans_remaining_pool() {
        let json = r#"{"participants":["A","B"],"remaining":["B","A","A","Ghost","B"],"rule":{"winnerCount":5}}"#;
        let snapshot = Snapshot::from_json(json, &Rule::default()).unwrap();

        let mut engine = free_form_engine(67);
        engine.restore(snapshot);
        assert_eq!(engine.remaining(), ["B", "A"]);

        let record = engine.draw_free_form().unwrap();
        let mut names = record.names.clone();
        names.sort();
        assert_eq!(names, ["A", "B"]);
        assert!(engine.remaining().is_empty());
    }

    #[test]
    fn test_pick_winning_slots_uniform_subset() {
        let mut rng = SeededRandom::new(61);
        let mut hits = [0usize; 10];

        for _ in 0..10_000 {
            let mask = pick_winning_slots(&mut rng, 10, 3);
            assert_eq!(mask.iter().filter(|w| **w).count(), 3);
            for (slot, won) in mask.iter().enumerate() {
                if *won {
                    hits[slot] += 1;
                }
            }
        }

        // Each slot should win about 30% of the time
        for count in hits {
            let share = count as f64 / 10_000.0;
            assert!((share - 0.3).abs() < 0.03, "slot share {}", share);
        }
    }
}
