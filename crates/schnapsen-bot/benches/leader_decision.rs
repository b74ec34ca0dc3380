use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use schnapsen_bot::{BotVariant, ProbabilityUtilityBot};
use schnapsen_core::game::bot::Bot;
use schnapsen_core::game::snapshot::PerspectiveSnapshot;
use schnapsen_core::model::card::Card;
use schnapsen_core::model::moves::Move;
use schnapsen_core::model::phase::GamePhase;
use schnapsen_core::model::suit::Suit;

fn opening(hand: &[&str], trump_card: &str) -> PerspectiveSnapshot {
    let cards: Vec<Card> = hand
        .iter()
        .map(|text| text.parse().expect("valid card"))
        .collect();
    let mut seen = cards.clone();
    seen.push(trump_card.parse().expect("valid card"));
    let trump = seen[seen.len() - 1].suit;
    PerspectiveSnapshot::new(GamePhase::One, trump)
        .with_valid_moves(cards.into_iter().map(Move::regular).collect())
        .with_seen_cards(seen)
}

fn bench_leader(c: &mut Criterion) {
    let mut group = c.benchmark_group("leader_decision");
    let cases = [
        ("mixed", opening(&["AH", "10H", "KC", "QS", "JS"], "JD")),
        ("single_suit", opening(&["AS", "10S", "KS", "QS", "JH"], "AC")),
    ];

    for variant in [BotVariant::A, BotVariant::Afro] {
        for (label, snapshot) in &cases {
            group.bench_function(format!("{variant}_{label}"), |b| {
                b.iter_batched(
                    || ProbabilityUtilityBot::from_variant(variant, 2025),
                    |mut bot| black_box(bot.get_move(snapshot, None)),
                    BatchSize::SmallInput,
                )
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_leader);
criterion_main!(benches);
