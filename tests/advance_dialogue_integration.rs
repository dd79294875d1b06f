//! End-to-end tests for the advance-dialogue flow: handler, engine, and
//! in-memory store working together.

use std::sync::{Arc, Mutex};

use wingmate::adapters::{FixedClock, InMemoryDialogueStore};
use wingmate::application::handlers::{AdvanceDialogueCommand, AdvanceDialogueHandler};
use wingmate::config::StrategyConfig;
use wingmate::domain::foundation::{DialogueId, Timestamp};
use wingmate::domain::strategy::{Channel, DialogueStage, Objective, SenderRole};
use wingmate::ports::Clock;
use wingmate::telemetry;

/// Clock the test can move forward between messages.
struct TestClock {
    now: Mutex<Timestamp>,
}

impl TestClock {
    fn starting_at(instant: Timestamp) -> Self {
        Self {
            now: Mutex::new(instant),
        }
    }

    fn set(&self, instant: Timestamp) {
        *self.now.lock().unwrap() = instant;
    }
}

impl Clock for TestClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap()
    }
}

fn start_instant() -> Timestamp {
    Timestamp::from_unix_secs(1705276800)
}

fn handler(clock: Arc<dyn Clock>) -> AdvanceDialogueHandler {
    telemetry::init();
    AdvanceDialogueHandler::new(
        &StrategyConfig::default(),
        Arc::new(InMemoryDialogueStore::new()),
        clock,
    )
    .unwrap()
}

async fn send(
    handler: &AdvanceDialogueHandler,
    id: DialogueId,
    text: &str,
    sender: SenderRole,
    channel: Channel,
) -> wingmate::application::handlers::AdvanceDialogueResult {
    handler
        .advance(AdvanceDialogueCommand::new(id, text, sender, channel))
        .await
        .unwrap()
}

#[tokio::test]
async fn a_dialogue_walks_the_whole_funnel() {
    let handler = handler(Arc::new(FixedClock::at(start_instant())));
    let id = DialogueId::new();

    // Opening: five engaged exchanges on the dating app. Counterpart
    // questions and emoji push base interest from 50 toward the
    // Telegram-invite threshold.
    let mut last = None;
    for _ in 0..5 {
        send(&handler, id, "ну а что было дальше?", SenderRole::User, Channel::DatingApp).await;
        last = Some(
            send(
                &handler,
                id,
                "а ты любишь горы? 😊",
                SenderRole::Counterpart,
                Channel::DatingApp,
            )
            .await,
        );
    }
    let result = last.unwrap();

    // Ten messages, interest 50 + 5 * 8 = 90: the stage machine walks
    // Opening -> Rapport -> TelegramInvite and the policy pushes the
    // invite.
    assert_eq!(result.state.message_count_total, 10);
    assert_eq!(result.state.base_interest, 90.0);
    assert_eq!(result.state.stage, DialogueStage::TelegramInvite);
    assert_eq!(result.objective, Objective::TelegramInvite);

    // The user sends their handle; the attempt is counted.
    let result = send(
        &handler,
        id,
        "пиши мне в телеграм: @anna",
        SenderRole::User,
        Channel::DatingApp,
    )
    .await;
    assert_eq!(result.state.telegram_invite_attempts, 1);

    // The counterpart confirms the move off-app.
    handler.mark_telegram_confirmed(id).await.unwrap();

    // Sixteen messages on Telegram keep interest at the ceiling and
    // build the exchange the date-invite rule requires.
    let mut result = None;
    for _ in 0..8 {
        send(&handler, id, "ну расскажи еще", SenderRole::User, Channel::Telegram).await;
        result = Some(
            send(
                &handler,
                id,
                "мне с тобой так легко, а что ты делаешь на выходных? 😊",
                SenderRole::Counterpart,
                Channel::Telegram,
            )
            .await,
        );
    }
    let result = result.unwrap();

    assert_eq!(result.state.stage, DialogueStage::OnTelegram);
    assert!(result.state.telegram_message_count >= 15);
    assert_eq!(result.state.base_interest, 100.0);
    assert_eq!(result.objective, Objective::DateInvite);

    // The user proposes; the dialogue reaches date planning.
    let result = send(
        &handler,
        id,
        "давай встретимся в субботу, сходим вместе на рынок?",
        SenderRole::User,
        Channel::Telegram,
    )
    .await;
    assert_eq!(result.state.date_invite_attempts, 1);
    assert!(result.state.has_future_projection);
    assert_eq!(result.state.stage, DialogueStage::DatePlanning);
}

#[tokio::test]
async fn a_long_silence_flips_the_objective_to_rewarm() {
    let clock = Arc::new(TestClock::starting_at(start_instant()));
    let handler = handler(clock.clone());
    let id = DialogueId::new();

    let result = send(
        &handler,
        id,
        "привет! как прошел твой день?",
        SenderRole::Counterpart,
        Channel::DatingApp,
    )
    .await;
    assert_eq!(result.objective, Objective::Continue);

    // Three days of silence, far past the 48h rewarm window.
    clock.set(start_instant().plus_hours(72).plus_minutes(1));

    let result = send(
        &handler,
        id,
        "извини, пропала надолго",
        SenderRole::Counterpart,
        Channel::DatingApp,
    )
    .await;
    assert_eq!(result.objective, Objective::Rewarm);
    // The silence also decayed the effective interest.
    assert!(result.state.freshness_multiplier < 1.0);

    // Once the exchange resumes promptly, the objective recovers.
    clock.set(start_instant().plus_hours(73));
    let result = send(
        &handler,
        id,
        "ничего страшного! расскажи, где была?",
        SenderRole::Counterpart,
        Channel::DatingApp,
    )
    .await;
    assert_ne!(result.objective, Objective::Rewarm);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_messages_for_one_dialogue_are_serialized() {
    let handler = Arc::new(handler(Arc::new(FixedClock::at(start_instant()))));
    let id = DialogueId::new();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let handler = Arc::clone(&handler);
        tasks.push(tokio::spawn(async move {
            handler
                .advance(AdvanceDialogueCommand::new(
                    id,
                    format!("сообщение номер {i}"),
                    SenderRole::Counterpart,
                    Channel::DatingApp,
                ))
                .await
        }));
    }

    let mut final_count = 0;
    for task in tasks {
        let result = task.await.unwrap().unwrap();
        final_count = final_count.max(result.state.message_count_total);
    }

    // No transition was lost: every message is reflected in the counter.
    assert_eq!(final_count, 20);
}

#[tokio::test]
async fn distinct_dialogues_do_not_interfere() {
    let handler = handler(Arc::new(FixedClock::at(start_instant())));
    let a = DialogueId::new();
    let b = DialogueId::new();

    for _ in 0..3 {
        send(&handler, a, "привет", SenderRole::Counterpart, Channel::DatingApp).await;
    }
    let result_b = send(&handler, b, "привет", SenderRole::Counterpart, Channel::DatingApp).await;
    let result_a = send(&handler, a, "привет", SenderRole::Counterpart, Channel::DatingApp).await;

    assert_eq!(result_a.state.message_count_total, 4);
    assert_eq!(result_b.state.message_count_total, 1);
}
