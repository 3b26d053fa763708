use glam::Vec4;

use super::*;
use crate::shader::basic::{Passthrough, SolidColor};

type Flat = Rasterizer<Passthrough<Vec4>, SolidColor<Vec4>>;

fn rasterizer(threads: usize, target: &Arc<FrameTarget>) -> Flat {
    let config = RasterConfig {
        threads,
        vertex_batch_size: 2,
        triangle_batch_size: 1,
        fragment_batch_size: 5,
        ..RasterConfig::default()
    };
    Rasterizer::new(
        config,
        Arc::clone(target),
        Passthrough::new(),
        SolidColor::new(Vec4::ONE),
    )
    .unwrap()
}

fn quad(z: f32) -> (Arc<[Vec4]>, Arc<[u32]>) {
    let v = [
        Vec4::new(-1.0, -1.0, z, 1.0),
        Vec4::new(1.0, -1.0, z, 1.0),
        Vec4::new(1.0, 1.0, z, 1.0),
        Vec4::new(-1.0, 1.0, z, 1.0),
    ];
    (Arc::from(v), Arc::from([0u32, 1, 2, 0, 2, 3]))
}

#[test]
fn invalid_config_is_rejected() {
    let target = Arc::new(FrameTarget::new(4, 4).unwrap());
    let err = Rasterizer::new(
        RasterConfig::with_threads(0),
        target,
        Passthrough::<Vec4>::new(),
        SolidColor::new(Vec4::ONE),
    )
    .err()
    .unwrap();
    assert!(matches!(err, RasterError::Validation(_)));
}

#[test]
fn malformed_draw_input_is_rejected() {
    let target = Arc::new(FrameTarget::new(4, 4).unwrap());
    for threads in [1, 3] {
        let mut r = rasterizer(threads, &target);
        let (v, _) = quad(0.0);
        let err = r.draw(&v, &Arc::from([0u32, 1])).unwrap_err();
        assert!(err.to_string().contains("multiple of 3"), "{err}");
        let err = r.draw(&v, &Arc::from([0u32, 1, 4])).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }
}

#[test]
fn full_screen_quad_writes_every_pixel_once() {
    for threads in [1, 4] {
        let target = Arc::new(FrameTarget::new(9, 7).unwrap());
        let mut r = rasterizer(threads, &target);
        let (v, i) = quad(0.0);
        let stats = r.draw(&v, &i).unwrap();
        assert_eq!(stats.vertices, 4);
        assert_eq!(stats.triangles, 2);
        // Pixels on the shared diagonal may be emitted by both triangles.
        assert!(stats.fragments_emitted >= 63);
        assert_eq!(stats.fragments_written, stats.fragments_emitted);
        for y in 0..7 {
            for x in 0..9 {
                assert_eq!(target.color(x, y), crate::Rgba8::WHITE);
                assert_eq!(target.depth(x, y), 0.0);
            }
        }
    }
}

#[test]
fn scratch_is_reset_between_frames() {
    let target = Arc::new(FrameTarget::new(8, 8).unwrap());
    let mut r = rasterizer(3, &target);
    let (v, i) = quad(0.0);
    let first = r.draw(&v, &i).unwrap();
    // Same depth again: equal depth passes, so everything is rewritten.
    let second = r.draw(&v, &i).unwrap();
    assert_eq!(first, second);

    let (far, i) = quad(0.9);
    let third = r.draw(&far, &i).unwrap();
    assert_eq!(third.fragments_emitted, first.fragments_emitted);
    assert_eq!(third.fragments_written, 0);
}

#[test]
fn shaders_can_be_updated_between_frames() {
    let target = Arc::new(FrameTarget::new(4, 4).unwrap());
    let mut r = rasterizer(2, &target);
    r.fragment_shader_mut().color = Vec4::new(0.0, 1.0, 0.0, 1.0);
    let (v, i) = quad(0.0);
    r.draw(&v, &i).unwrap();
    assert_eq!(target.color(2, 2), crate::Rgba8::new(0, 255, 0, 255));
    assert_eq!(r.fragment_shader().color.y, 1.0);
}

#[derive(Clone)]
struct Exploding;

impl FragmentShader for Exploding {
    type Input = Vec4;

    fn shade(&self, _input: &Vec4) -> Vec4 {
        panic!("shader failure");
    }
}

#[test]
fn panicking_shader_is_reported_and_rasterizer_recovers() {
    let target = Arc::new(FrameTarget::new(4, 4).unwrap());
    let mut r = Rasterizer::new(
        RasterConfig::with_threads(2),
        Arc::clone(&target),
        Passthrough::<Vec4>::new(),
        Exploding,
    )
    .unwrap();
    let (v, i) = quad(0.0);
    let err = r.draw(&v, &i).unwrap_err();
    assert!(matches!(err, RasterError::Pipeline(_)), "{err}");

    // Nothing left over: an empty draw reports empty counters.
    let stats = r.draw(&v, &Arc::from([] as [u32; 0])).unwrap();
    assert_eq!(stats.fragments_emitted, 0);
    assert_eq!(stats.fragments_written, 0);
}
