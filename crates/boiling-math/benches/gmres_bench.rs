use std::hint::black_box;
use std::sync::Arc;

use boiling_math::gmres::{gmres_solve, GmresConfig};
use boiling_math::sparse::{SparseMatrix, SparsePortrait};
use boiling_math::templates::{mass_r, mass_z, mu, nu, stiffness_r, stiffness_z};
use boiling_types::state::Grid;
use criterion::{criterion_group, criterion_main, Criterion};

/// Diffusion plus mass operator on a uniform grid, assembled from templates.
fn implicit_operator(ne: usize) -> SparseMatrix {
    let grid = Grid::uniform(ne, ne, 0.0, 1.0, 0.0, 1.0).unwrap();
    let portrait = SparsePortrait::build(&grid.elements, grid.nodes_count());
    let mut matrix = SparseMatrix::new(Arc::new(portrait));
    for e in &grid.elements {
        let r0 = grid.nodes[e.node_indexes[0]].r;
        let (mr, sr) = (mass_r(r0, e.width), stiffness_r(r0, e.width));
        let (mz, sz) = (mass_z(e.length), stiffness_z(e.length));
        let mut local = [[0.0; 4]; 4];
        for (i, row) in local.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                let (a, b, c, d) = (mu(i), mu(j), nu(i), nu(j));
                *v = sr[a][b] * mz[c][d] + mr[a][b] * sz[c][d] + 10.0 * mr[a][b] * mz[c][d];
            }
        }
        matrix.add_local(&local, &e.node_indexes);
    }
    matrix
}

fn bench_gmres_32(c: &mut Criterion) {
    let matrix = implicit_operator(32);
    let b = vec![1.0; matrix.size()];
    let config = GmresConfig::default();

    c.bench_function("gmres_32x32_elements", |bench| {
        bench.iter(|| {
            let mut x = vec![0.0; b.len()];
            let res = gmres_solve(&matrix, &b, &mut x, &config);
            black_box(res.iterations);
        })
    });
}

fn bench_matvec_64(c: &mut Criterion) {
    let matrix = implicit_operator(64);
    let x = vec![1.0; matrix.size()];
    let mut y = vec![0.0; matrix.size()];

    c.bench_function("sparse_matvec_64x64_elements", |bench| {
        bench.iter(|| {
            matrix.multiply(black_box(&x), &mut y);
            black_box(y[0]);
        })
    });
}

criterion_group!(benches, bench_gmres_32, bench_matvec_64);
criterion_main!(benches);
