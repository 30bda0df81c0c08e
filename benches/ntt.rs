use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ntt64::dft::ntt::Table;
use ntt64::modulus::WordOps;

fn ntt(c: &mut Criterion) {
    fn runner<'a, const LAZY: bool>(table: &'a Table<u64>) -> Box<dyn FnMut() + 'a> {
        let n: usize = table.coeff_count();
        let mut a: Vec<u64> = (0..n as u64).collect();
        if LAZY {
            Box::new(move || table.forward_inplace_lazy(&mut a))
        } else {
            Box::new(move || table.forward_inplace(&mut a))
        }
    }

    let q: u64 = 0x1fffffffffe00001u64;

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("ntt");

    for log_n in 10..15 {
        let table: Table<u64> = Table::<u64>::new(log_n, q).unwrap();

        let runners: [(String, Box<dyn FnMut()>); 2] = [
            (format!("LAZY=true/q={}", q.log2()), runner::<true>(&table)),
            (format!("LAZY=false/q={}", q.log2()), runner::<false>(&table)),
        ];

        for (name, mut runner) in runners {
            let id: BenchmarkId = BenchmarkId::new(name, format!("n={}", 1 << log_n));
            b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| {
                b.iter(&mut runner)
            });
        }
    }
}

fn intt(c: &mut Criterion) {
    fn runner<'a>(table: &'a Table<u64>) -> Box<dyn FnMut() + 'a> {
        let n: usize = table.coeff_count();
        let mut a: Vec<u64> = (0..n as u64).collect();
        Box::new(move || table.backward_inplace(&mut a))
    }

    let q: u64 = 0x1fffffffffe00001u64;

    let mut b: criterion::BenchmarkGroup<'_, criterion::measurement::WallTime> =
        c.benchmark_group("intt");

    for log_n in 10..15 {
        let table: Table<u64> = Table::<u64>::new(log_n, q).unwrap();

        let runners: [(String, Box<dyn FnMut()>); 1] =
            [(format!("q={}", q.log2()), runner(&table))];

        for (name, mut runner) in runners {
            let id: BenchmarkId = BenchmarkId::new(name, format!("n={}", 1 << log_n));
            b.bench_with_input(id, &(), |b: &mut criterion::Bencher<'_>, _| {
                b.iter(&mut runner)
            });
        }
    }
}

criterion_group!(benches, ntt, intt);
criterion_main!(benches);
