use criterion::*;
use link_rank::{
    page_rank::{iterated, sampled, IteratedPageRank, PageRank, SampledPageRank},
    LinkGraph, RngSource,
};
use rand::{prelude::*, rngs::SmallRng};

criterion_main!(benches);
criterion_group!(benches, clique, rope, random_graph);

fn bench_both(group: &mut BenchmarkGroup<'_, measurement::WallTime>, g: &LinkGraph, n: usize) {
    group.bench_with_input(BenchmarkId::new("Iterated", n), &n, |b, _| {
        b.iter(|| {
            let ipr = IteratedPageRank::new(g, &iterated::Config::default()).unwrap();
            black_box(ipr.calc(&ipr.graph().uniform()).unwrap());
        })
    });
    group.bench_with_input(BenchmarkId::new("Sampled", n), &n, |b, _| {
        b.iter(|| {
            let rng = RngSource(SmallRng::seed_from_u64(3407));
            let spr = SampledPageRank::new(g, &sampled::Config::default(), rng).unwrap();
            black_box(spr.calc(&g.uniform()).unwrap());
        })
    });
}

fn clique(c: &mut Criterion) {
    let mut group = c.benchmark_group("Clique");
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    group.plot_config(plot_config);
    const SIZES: &[usize] = &[10usize, 20usize, 40usize, 80usize];
    for n in SIZES.iter() {
        let names = names(*n);
        let g = LinkGraph::from_links(names.iter().map(|p| (p, names.iter())));
        bench_both(&mut group, &g, *n);
    }
    group.finish();
}

fn rope(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rope");
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    group.plot_config(plot_config);
    const SIZES: &[usize] = &[10usize, 20usize, 40usize, 80usize, 160usize];
    for n in SIZES.iter() {
        let names = names(*n);
        // the tail is a sink
        let g = LinkGraph::from_links(
            names
                .iter()
                .enumerate()
                .map(|(i, p)| (p, names.get(i + 1).into_iter())),
        );
        bench_both(&mut group, &g, *n);
    }
    group.finish();
}

fn random_graph(c: &mut Criterion) {
    const V_SIZE: &[usize] = &[10usize, 20usize, 40usize, 80usize];
    const E_POW: &[f64] = &[1.0, 1.25, 1.5];
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    let mut rng = SmallRng::seed_from_u64(3407);
    for e_m in E_POW.iter() {
        let mut group = c.benchmark_group(format!("RandomGraph_{e_m:.2}"));
        group.plot_config(plot_config.clone());
        for v_n in V_SIZE.iter() {
            let e_n = (*v_n as f64).powf(*e_m) as usize;
            let g = gen_random_graph(&mut rng, *v_n, e_n);
            bench_both(&mut group, &g, *v_n);
        }
        group.finish();
    }
}

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{i}.html")).collect()
}

fn gen_random_graph<R>(rng: &mut R, v_n: usize, e_n: usize) -> LinkGraph
where
    R: SeedableRng + Rng,
{
    let vs = names(v_n);
    let mut links: Vec<(String, Vec<String>)> = vs.iter().map(|p| (p.clone(), vec![])).collect();
    for _ in 0..e_n {
        let u = rng.random_range(0..v_n);
        let v = vs.choose(rng).unwrap();
        links[u].1.push(v.clone());
    }
    LinkGraph::from_links(links)
}
