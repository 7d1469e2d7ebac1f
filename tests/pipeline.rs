//! End-to-end tests: sample a surface patch, triangulate the samples with
//! constraints, classify regions and extract the final mesh arrays.

use rand::SeedableRng;

use quadedge::{
    enumerate_all_faces, enumerate_untrimmed, ConstrainedDelaunayTriangulation, EdgeType, Point2,
    PoissonDiskSampler, SamplePoint, Surface,
};

/// A shallow paraboloid bowl over the unit square.
struct Bowl;

impl Surface for Bowl {
    fn u_min(&self) -> f64 {
        -1.0
    }
    fn u_max(&self) -> f64 {
        1.0
    }
    fn v_min(&self) -> f64 {
        -1.0
    }
    fn v_max(&self) -> f64 {
        1.0
    }
    fn point(&self, u: f64, v: f64) -> [f64; 3] {
        [u, v, 0.5 * (u * u + v * v)]
    }
    fn du(&self, u: f64, v: f64) -> [f64; 3] {
        assert!(u >= -1.0 && u <= 1.0 && v >= -1.0 && v <= 1.0);
        [1.0, 0.0, u]
    }
    fn dv(&self, u: f64, v: f64) -> [f64; 3] {
        assert!(u >= -1.0 && u <= 1.0 && v >= -1.0 && v <= 1.0);
        [0.0, 1.0, v]
    }
}

#[test]
fn sampled_patch_triangulates_into_consistent_mesh() {
    let mut rng = rand::rngs::StdRng::from_seed(*b"Zt3mWq8xCv1bNf6hJk0lPo5rDs2aGu9y");
    let samples = PoissonDiskSampler::new(0.25, 200).sample(&Bowl, &mut rng);
    assert!(samples.len() >= 4);

    let num_samples = samples.len();
    let cdt = ConstrainedDelaunayTriangulation::new(samples).expect("valid sample set");
    assert_eq!(cdt.num_vertices(), num_samples);

    let mesh = enumerate_all_faces(&cdt);
    assert_eq!(mesh.vertices.len(), num_samples);
    assert_eq!(mesh.edge_types.len(), mesh.num_edges());
    assert_eq!(mesh.triangles.len() % 3, 0);

    // Euler's formula over the bounded complex (hull counts as one face).
    let v = mesh.vertices.len() as isize;
    let e = mesh.num_edges() as isize;
    let f = mesh.num_triangles() as isize;
    assert_eq!(v - e + f, 1);

    // The surface payload survives enumeration.
    for sample in &mesh.vertices {
        let [x, y, z] = sample.position_3d();
        assert_eq!(Point2::new(x, y), sample.uv());
        assert!(z >= 0.0 && z <= 1.0);
    }

    // No constraints were inserted.
    assert!(mesh
        .edge_types
        .iter()
        .all(|&edge_type| edge_type != EdgeType::Constrained));
}

#[test]
fn constrained_outline_trims_the_exterior() {
    // A square patch of samples with a constrained diamond outline in the
    // middle; only the diamond's interior is kept.
    let mut points: Vec<SamplePoint> = Vec::new();
    for x in -4..=4 {
        for y in -4..=4 {
            let uv = Point2::new(f64::from(x), f64::from(y));
            points.push(SamplePoint::new(uv, [uv.x, uv.y, 0.0]));
        }
    }
    let index_of = |x: i32, y: i32| ((x + 4) * 9 + (y + 4)) as usize;
    let outline = [
        [index_of(3, 0), index_of(0, 3)],
        [index_of(0, 3), index_of(-3, 0)],
        [index_of(-3, 0), index_of(0, -3)],
        [index_of(0, -3), index_of(3, 0)],
    ];

    let cdt = ConstrainedDelaunayTriangulation::with_segments(points, &outline)
        .expect("valid constrained input");
    assert_eq!(cdt.num_vertices(), 81);
    // Each diamond side passes through two grid vertices and splits into
    // three constraint edges.
    assert_eq!(cdt.num_constrained_edges(), 12);

    let all = enumerate_all_faces(&cdt);
    let kept = enumerate_untrimmed(&cdt);
    assert!(kept.num_triangles() < all.num_triangles());

    // Every kept triangle's centroid lies inside the diamond |u| + |v| <= 3.
    for triangle in kept.triangles.chunks_exact(3) {
        let centroid_u: f64 = triangle.iter().map(|&i| kept.vertices[i].uv().x).sum::<f64>() / 3.0;
        let centroid_v: f64 = triangle.iter().map(|&i| kept.vertices[i].uv().y).sum::<f64>() / 3.0;
        assert!(
            centroid_u.abs() + centroid_v.abs() < 3.0,
            "triangle centroid ({centroid_u}, {centroid_v}) is outside the outline"
        );
    }

    // The outline itself is tagged as constrained in the full enumeration.
    let constrained = all
        .edge_types
        .iter()
        .filter(|&&edge_type| edge_type == EdgeType::Constrained)
        .count();
    assert_eq!(constrained, 12);
}
