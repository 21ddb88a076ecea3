use super::*;

fn particle_at(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
    Particle {
        position: Point::new(x, y),
        velocity: Vec2::new(vx, vy),
        size: 8.0,
        color: ParticleColor::Cyan,
        shape: Shape::Circle,
        rotation: 0.0,
        rotation_speed: 0.0,
        alpha: 0.8,
    }
}

fn field_with(canvas: Canvas, particles: Vec<Particle>) -> ParticleField {
    let mut f = ParticleField::new(canvas, ParticleConfig::default(), Rng64::new(1)).unwrap();
    f.particles = particles;
    f
}

#[test]
fn count_scales_with_area_and_is_capped() {
    let cfg = ParticleConfig::default();
    assert_eq!(cfg.particle_count(Canvas::new(1920, 1080)), 7);
    assert_eq!(cfg.particle_count(Canvas::new(400, 300)), 1);
    assert_eq!(cfg.particle_count(Canvas::new(300, 300)), 0);
    assert_eq!(cfg.particle_count(Canvas::new(0, 0)), 0);
}

#[test]
fn initialize_places_particles_in_central_half() {
    let cfg = ParticleConfig::default();
    let canvas = Canvas::new(1920, 1080);
    let ps = initialize(canvas, &cfg, &mut Rng64::new(42));
    assert_eq!(ps.len(), 7);
    for p in &ps {
        assert!((480.0..=1440.0).contains(&p.position.x));
        assert!((270.0..=810.0).contains(&p.position.y));
        assert!(p.velocity.hypot() <= cfg.max_initial_speed + 1e-9);
        assert!((cfg.size_range[0]..=cfg.size_range[1]).contains(&p.size));
        assert!((0.6..=0.9).contains(&p.alpha));
    }
}

#[test]
fn same_seed_gives_same_particles() {
    let cfg = ParticleConfig::default();
    let canvas = Canvas::new(1280, 720);
    let a = initialize(canvas, &cfg, &mut Rng64::new(9));
    let b = initialize(canvas, &cfg, &mut Rng64::new(9));
    assert_eq!(a, b);
}

#[test]
fn tick_keeps_particles_inside_and_under_max_speed() {
    let mut f = ParticleField::new(
        Canvas::new(800, 600),
        ParticleConfig::default(),
        Rng64::new(3),
    )
    .unwrap();
    let pointer = Some(Point::new(400.0, 300.0));
    for _ in 0..2000 {
        f.tick(1.0 / 30.0, pointer);
    }
    for p in f.particles() {
        assert!((0.0..=800.0).contains(&p.position.x));
        assert!((0.0..=600.0).contains(&p.position.y));
        assert!(p.velocity.hypot() <= 60.0 + 1e-9);
    }
}

#[test]
fn pointer_inside_radius_pushes_particle_away() {
    let mut f = field_with(
        Canvas::new(800, 600),
        vec![particle_at(200.0, 200.0, 0.0, 0.0)],
    );
    f.tick(1.0 / 60.0, Some(Point::new(150.0, 200.0)));
    let v = f.particles()[0].velocity;
    assert!(v.x > 5.0);
    assert!(v.y.abs() < 1e-9);
}

#[test]
fn pointer_outside_radius_has_no_effect() {
    let mut f = field_with(
        Canvas::new(800, 600),
        vec![particle_at(200.0, 200.0, 0.0, 0.0)],
    );
    f.tick(1.0 / 60.0, Some(Point::new(400.0, 200.0)));
    assert_eq!(f.particles()[0].velocity, Vec2::ZERO);
}

#[test]
fn particles_reflect_off_edges() {
    let mut f = field_with(
        Canvas::new(800, 600),
        vec![
            particle_at(799.0, 300.0, 60.0, 0.0),
            particle_at(1.0, 300.0, -60.0, 0.0),
            particle_at(400.0, 599.0, 0.0, 60.0),
        ],
    );
    f.tick(0.1, None);
    let ps = f.particles();
    assert!((ps[0].position.x - 795.0).abs() < 1e-9);
    assert!(ps[0].velocity.x < 0.0);
    assert!((ps[1].position.x - 5.0).abs() < 1e-9);
    assert!(ps[1].velocity.x > 0.0);
    assert!((ps[2].position.y - 595.0).abs() < 1e-9);
    assert!(ps[2].velocity.y < 0.0);
}

#[test]
fn speed_is_clamped() {
    let mut f = field_with(
        Canvas::new(800, 600),
        vec![particle_at(400.0, 300.0, 500.0, 0.0)],
    );
    f.tick(1.0 / 60.0, None);
    assert!(f.particles()[0].velocity.hypot() <= 60.0 + 1e-9);
}

#[test]
fn invalid_dt_is_ignored() {
    let mut f = field_with(
        Canvas::new(800, 600),
        vec![particle_at(400.0, 300.0, 10.0, 0.0)],
    );
    let before = f.particles().to_vec();
    f.tick(0.0, None);
    f.tick(f64::NAN, None);
    f.tick(-1.0, None);
    assert_eq!(f.particles(), before.as_slice());
}

#[test]
fn links_fade_with_distance() {
    let f = field_with(
        Canvas::new(800, 600),
        vec![
            particle_at(100.0, 100.0, 0.0, 0.0),
            particle_at(175.0, 100.0, 0.0, 0.0),
            particle_at(700.0, 500.0, 0.0, 0.0),
        ],
    );
    let links = f.links();
    assert_eq!(links.len(), 1);
    assert!((links[0].alpha - 0.05).abs() < 1e-6);
    assert_eq!(links[0].a, Point::new(100.0, 100.0));
}

#[test]
fn resize_regenerates_for_new_canvas() {
    let mut f = ParticleField::new(
        Canvas::new(1920, 1080),
        ParticleConfig::default(),
        Rng64::new(5),
    )
    .unwrap();
    assert_eq!(f.particles().len(), 7);
    f.resize(Canvas::new(400, 300));
    assert_eq!(f.canvas(), Canvas::new(400, 300));
    assert_eq!(f.particles().len(), 1);
    f.resize(Canvas::new(0, 0));
    assert!(f.particles().is_empty());
}

#[test]
fn validate_rejects_bad_tuning() {
    let bad_divisor = ParticleConfig {
        area_divisor: 0.0,
        ..ParticleConfig::default()
    };
    assert!(bad_divisor.validate().is_err());

    let bad_alpha = ParticleConfig {
        alpha_range: [0.5, 1.5],
        ..ParticleConfig::default()
    };
    assert!(bad_alpha.validate().is_err());

    let bad_fps = ParticleConfig {
        fps_cap: 0,
        ..ParticleConfig::default()
    };
    assert!(
        ParticleField::new(Canvas::new(10, 10), bad_fps, Rng64::new(0))
            .unwrap_err()
            .to_string()
            .starts_with("validation error:")
    );
}

#[test]
fn config_json_fills_missing_fields_with_defaults() {
    let cfg: ParticleConfig = serde_json::from_str(r#"{"max_particles": 3}"#).unwrap();
    assert_eq!(cfg.max_particles, 3);
    assert_eq!(cfg.fps_cap, 30);
    assert_eq!(cfg.area_divisor, 120_000.0);
}

#[test]
fn colors_match_brand_palette() {
    assert_eq!(ParticleColor::Cyan.rgba(), Rgba8::from_hex("#00bfff").unwrap());
    assert_eq!(ParticleColor::Violet.rgba(), Rgba8::from_hex("#8a2be2").unwrap());
}
