use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;

use biotranslate_rust::{
    translate_parallel, TranslationOptions, Translator, WorkerPool,
};

fn random_dna(rng: &mut StdRng, length: usize) -> String {
    let bases = [b'A', b'C', b'G', b'T'];
    (0..length)
        .map(|_| *bases.choose(rng).unwrap_or(&b'A') as char)
        .collect()
}

fn bench_single_sequence(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut group = c.benchmark_group("single_sequence");

    for &length in &[300usize, 30_000, 3_000_000] {
        let sequence = random_dna(&mut rng, length);
        let one_frame =
            Translator::new(TranslationOptions::default().with_break_on_stop(false)).unwrap();
        let six_frames = Translator::new(
            TranslationOptions::default()
                .with_break_on_stop(false)
                .with_all_frames(true)
                .with_include_reverse(true),
        )
        .unwrap();

        group.throughput(Throughput::Bytes(length as u64));
        group.bench_with_input(BenchmarkId::new("one_frame", length), &sequence, |b, s| {
            b.iter(|| one_frame.translate(black_box(s)))
        });
        group.bench_with_input(BenchmarkId::new("six_frames", length), &sequence, |b, s| {
            b.iter(|| six_frames.translate(black_box(s)))
        });
    }

    group.finish();
}

fn bench_batches(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let batch: Vec<String> = (0..2_000).map(|_| random_dna(&mut rng, 1_500)).collect();
    let options = TranslationOptions::default()
        .with_break_on_stop(false)
        .with_all_frames(true);
    let translator = Translator::new(options.clone()).unwrap();
    let pool = WorkerPool::with_default_size();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(batch.len() as u64));

    group.bench_function("sequential", |b| {
        b.iter(|| translator.translate_batch(black_box(&batch)))
    });
    group.bench_function("scoped_threads", |b| {
        b.iter(|| translate_parallel(black_box(&batch), &options).unwrap())
    });
    #[cfg(feature = "parallel")]
    group.bench_function("rayon", |b| {
        b.iter(|| biotranslate_rust::par_translate_batch(black_box(&batch), &options).unwrap())
    });
    group.bench_function("worker_pool", |b| {
        b.iter(|| {
            let handles: Vec<_> = batch
                .chunks(batch.len() / pool.size() + 1)
                .map(|slice| pool.translate(slice, &options).unwrap())
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.wait().unwrap())
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(13);
    let genome = random_dna(&mut rng, 4_000_000);
    let translator = Translator::new(
        TranslationOptions::default()
            .with_break_on_stop(false)
            .with_chunk_size(64 * 1024),
    )
    .unwrap();

    let mut group = c.benchmark_group("stream");
    group.throughput(Throughput::Bytes(genome.len() as u64));
    group.bench_function("4mb_in_8kb_chunks", |b| {
        b.iter(|| {
            let chunks = genome
                .as_bytes()
                .chunks(8 * 1024)
                .map(Ok::<_, std::convert::Infallible>);
            translator.translate_stream(chunks).count()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_single_sequence, bench_batches, bench_stream);
criterion_main!(benches);
