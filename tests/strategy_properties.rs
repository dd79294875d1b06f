//! Property tests for the strategy engine's numeric and monotonicity
//! invariants.

use proptest::prelude::*;

use wingmate::config::StrategyConfig;
use wingmate::domain::foundation::Timestamp;
use wingmate::domain::strategy::{
    CounterpartFeatures, DialogueStage, DialogueState, FreshnessDecay, InterestModel, SenderRole,
    StageMachine, StrategyEngine,
};

fn config() -> StrategyConfig {
    StrategyConfig::default()
}

fn engine() -> StrategyEngine {
    StrategyEngine::new(&config()).unwrap()
}

fn arb_stage() -> impl Strategy<Value = DialogueStage> {
    prop_oneof![
        Just(DialogueStage::Opening),
        Just(DialogueStage::Rapport),
        Just(DialogueStage::TelegramInvite),
        Just(DialogueStage::OnTelegram),
        Just(DialogueStage::DatePlanning),
    ]
}

prop_compose! {
    fn arb_features()(
        word_count in 0usize..200,
        has_question in any::<bool>(),
        has_emoji in any::<bool>(),
        is_short in any::<bool>(),
        is_long in any::<bool>(),
        has_personal_disclosure in any::<bool>(),
    ) -> CounterpartFeatures {
        CounterpartFeatures {
            word_count,
            has_question,
            has_emoji,
            is_short,
            is_long,
            has_personal_disclosure,
        }
    }
}

prop_compose! {
    fn arb_state()(
        stage in arb_stage(),
        base_interest in 0.0..=100.0f64,
        freshness_multiplier in 0.0..=1.0f64,
        has_future_projection in any::<bool>(),
        telegram_invite_attempts in 0u32..10,
        date_invite_attempts in 0u32..10,
        is_on_telegram in any::<bool>(),
        message_count_total in 0u32..100,
        telegram_message_count in 0u32..100,
        last_message_secs in proptest::option::of(1_600_000_000u64..1_800_000_000),
    ) -> DialogueState {
        let effective_interest =
            (base_interest * freshness_multiplier * 100.0).round() / 100.0;
        DialogueState {
            stage,
            base_interest,
            freshness_multiplier,
            effective_interest,
            has_future_projection,
            telegram_invite_attempts,
            date_invite_attempts,
            is_on_telegram,
            message_count_total,
            telegram_message_count,
            last_message_at: last_message_secs.map(Timestamp::from_unix_secs),
        }
    }
}

proptest! {
    #[test]
    fn interest_always_stays_within_bounds(
        old_base in -500.0..600.0f64,
        features in arb_features(),
    ) {
        let model = InterestModel::new(config().weights, config().bounds);
        let new_base = model.updated_base(old_base, &features);
        prop_assert!(new_base >= config().bounds.min);
        prop_assert!(new_base <= config().bounds.max);
    }

    #[test]
    fn stage_never_decreases(
        state in arb_state(),
        effective_interest in 0.0..=100.0f64,
    ) {
        let machine = StageMachine::new(config().stages);
        prop_assert!(machine.advanced(&state, effective_interest) >= state.stage);
    }

    #[test]
    fn no_prior_message_always_means_full_freshness(
        now_secs in 0u64..4_000_000_000,
    ) {
        let decay = FreshnessDecay::new(config().freshness);
        let now = Timestamp::from_unix_secs(now_secs);
        prop_assert_eq!(decay.multiplier(None, &now), 1.0);
    }

    #[test]
    fn engine_never_mutates_its_input(
        state in arb_state(),
        text in ".{0,120}",
        from_counterpart in any::<bool>(),
    ) {
        let sender = if from_counterpart {
            SenderRole::Counterpart
        } else {
            SenderRole::User
        };
        let now = Timestamp::from_unix_secs(1_805_000_000);
        let before = state.clone();
        let _ = engine().run(&state, &text, sender, now);
        prop_assert_eq!(state, before);
    }

    #[test]
    fn engine_keeps_monotonic_fields_monotonic(
        state in arb_state(),
        text in ".{0,120}",
        from_counterpart in any::<bool>(),
    ) {
        let sender = if from_counterpart {
            SenderRole::Counterpart
        } else {
            SenderRole::User
        };
        let now = Timestamp::from_unix_secs(1_805_000_000);
        let outcome = engine().run(&state, &text, sender, now);

        prop_assert!(outcome.state.stage >= state.stage);
        prop_assert!(outcome.state.has_future_projection || !state.has_future_projection);
        prop_assert!(outcome.state.telegram_invite_attempts >= state.telegram_invite_attempts);
        prop_assert!(outcome.state.date_invite_attempts >= state.date_invite_attempts);
    }

    #[test]
    fn engine_is_deterministic(
        state in arb_state(),
        text in ".{0,120}",
        from_counterpart in any::<bool>(),
    ) {
        let sender = if from_counterpart {
            SenderRole::Counterpart
        } else {
            SenderRole::User
        };
        let now = Timestamp::from_unix_secs(1_805_000_000);
        let a = engine().run(&state, &text, sender, now);
        let b = engine().run(&state, &text, sender, now);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn effective_interest_stays_within_bounds_after_any_counterpart_message(
        state in arb_state(),
        text in ".{0,120}",
    ) {
        let now = Timestamp::from_unix_secs(1_805_000_000);
        let outcome = engine().run(&state, &text, SenderRole::Counterpart, now);

        prop_assert!(outcome.state.base_interest >= config().bounds.min);
        prop_assert!(outcome.state.base_interest <= config().bounds.max);
        // Effective interest is base scaled by a multiplier in [0, 1],
        // so it cannot exceed the base bounds either.
        prop_assert!(outcome.state.effective_interest >= config().bounds.min);
        prop_assert!(outcome.state.effective_interest <= config().bounds.max);
    }
}
