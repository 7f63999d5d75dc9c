use criterion::{black_box, criterion_group, criterion_main, Criterion};
use set_engine::{contains_set, find_completion, Card, SetConfig, SetGame};

/// A table of `size` cards from a seeded game.
fn table(seed: u64, size: usize) -> Vec<Card> {
    let config = SetConfig::default()
        .with_seed(seed)
        .with_deal_sizes(size, 3);
    let mut game = SetGame::new(config).expect("valid bench config");
    game.deal();
    game.visible_cards()
}

fn bench_hint(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hint search");

    for size in [12, 21, 81] {
        let cards = table(3, size);
        let pool: Vec<&Card> = cards.iter().collect();

        group.bench_function(format!("contains_set ({size} cards)"), |b| {
            b.iter(|| black_box(contains_set(black_box(&pool))));
        });

        group.bench_function(format!("complete single ({size} cards)"), |b| {
            let selected = [pool[0]];
            b.iter(|| black_box(find_completion(&selected, black_box(&pool[1..]))));
        });
    }

    group.bench_function("SetGame::hint (fresh table)", |b| {
        let mut game = SetGame::new(SetConfig::default().with_seed(3)).expect("valid config");
        game.deal();
        b.iter_batched(
            || game.clone(),
            |mut g| black_box(g.hint()),
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_hint);
criterion_main!(benches);
