use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use softraster::glam::{Mat4, Vec3, Vec4};
use softraster::{
    ColorShader, Culling, Device, FbDevSink, FlatShader, FragmentShader, FrameStats, FrameTimings,
    Mesh, NullSink, PhongFragmentShader, PhongVertexShader, PngSink, RasterConfig, Rasterizer,
    Texture, TexturedShader, Vertex, VertexShader,
};

#[derive(Parser, Debug)]
#[command(name = "softraster", version)]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an OBJ mesh from an orbiting camera and report frame timings.
    Render(RenderArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Shading {
    Flat,
    Color,
    Phong,
    Textured,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CullingArg {
    Clockwise,
    CounterClockwise,
    None,
}

impl From<CullingArg> for Culling {
    fn from(arg: CullingArg) -> Self {
        match arg {
            CullingArg::Clockwise => Culling::Clockwise,
            CullingArg::CounterClockwise => Culling::CounterClockwise,
            CullingArg::None => Culling::None,
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input Wavefront OBJ mesh.
    #[arg(long)]
    mesh: PathBuf,

    /// Texture image (required by `--shading textured`).
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Fragment shading model.
    #[arg(long, value_enum, default_value_t = Shading::Phong)]
    shading: Shading,

    /// Output PNG path for the final frame.
    #[arg(long, default_value = "frame.png")]
    out: PathBuf,

    /// Also write every frame as raw BGRA to this framebuffer device.
    #[arg(long)]
    fbdev: Option<PathBuf>,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Number of frames; the camera makes one full orbit.
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Overlay triangle edges in this pass after shading.
    #[arg(long, default_value_t = false)]
    wireframe: bool,

    /// Rasterizer configuration JSON; the flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker threads (defaults to the available parallelism).
    #[arg(long)]
    threads: Option<usize>,

    /// Winding to cull.
    #[arg(long, value_enum)]
    culling: Option<CullingArg>,

    /// Items per task for every stage.
    #[arg(long)]
    batch_size: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn raster_config(args: &RenderArgs) -> anyhow::Result<RasterConfig> {
    let mut config = match &args.config {
        Some(path) => RasterConfig::from_json_file(path)?,
        None => RasterConfig {
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
            ..RasterConfig::default()
        },
    };
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    if let Some(culling) = args.culling {
        config.culling = culling.into();
    }
    if let Some(size) = args.batch_size {
        config.vertex_batch_size = size;
        config.triangle_batch_size = size;
        config.fragment_batch_size = size;
    }
    config.validate()?;
    Ok(config)
}

/// Camera orbiting the mesh bounds.
struct Orbit {
    center: Vec3,
    distance: f32,
    projection: Mat4,
}

impl Orbit {
    fn new(mesh: &Mesh, aspect_ratio: f32) -> Self {
        let (min, max) = mesh.vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), v| (min.min(v.pos), max.max(v.pos)),
        );
        let (center, radius) = if mesh.vertices.is_empty() {
            (Vec3::ZERO, 1.0)
        } else {
            ((min + max) / 2.0, ((max - min).length() / 2.0).max(1e-3))
        };
        let distance = radius * 2.5;
        Self {
            center,
            distance,
            projection: softraster::projection_matrix(
                60f32.to_radians(),
                aspect_ratio,
                distance * 0.05,
                distance * 4.0,
            ),
        }
    }

    /// Eye position and view-projection matrix for frame `frame` of `frames`.
    fn at(&self, frame: u32, frames: u32) -> (Vec3, Mat4) {
        let angle = std::f32::consts::TAU * frame as f32 / frames.max(1) as f32;
        let dir = Vec3::new(angle.sin(), 0.35, angle.cos()).normalize();
        let eye = self.center + dir * self.distance;
        let view = softraster::look_at(eye, self.center, Vec3::Y);
        (eye, self.projection * view)
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frames > 0, "--frames must be at least 1");
    let config = raster_config(&args)?;
    let mesh = Mesh::load_obj(&args.mesh)?;

    let mut device = match &args.fbdev {
        Some(path) => Device::new(args.width, args.height, FbDevSink::new(path))?,
        None => Device::new(args.width, args.height, NullSink)?,
    };
    let target = Arc::clone(device.target());
    let orbit = Orbit::new(&mesh, target.viewport().aspect_ratio());

    let (timings, stats) = match args.shading {
        Shading::Flat => {
            let shader = FlatShader::default();
            let r = Rasterizer::new(config, target, shader, shader)?;
            render_frames(&args, &mesh, &orbit, &mut device, r, |r, vp, _| {
                r.vertex_shader_mut().mvp = vp;
            })?
        }
        Shading::Color => {
            let shader = ColorShader::default();
            let r = Rasterizer::new(config, target, shader, shader)?;
            render_frames(&args, &mesh, &orbit, &mut device, r, |r, vp, _| {
                r.vertex_shader_mut().mvp = vp;
            })?
        }
        Shading::Phong => {
            let fragment = PhongFragmentShader {
                light_pos: orbit.center + Vec3::new(1.0, 2.0, 1.5) * orbit.distance,
                // Inverse-square falloff: scale so the lit side stays bright at any mesh size.
                diffuse_coeff: 10.0 * orbit.distance * orbit.distance,
                ..PhongFragmentShader::default()
            };
            let r = Rasterizer::new(config, target, PhongVertexShader::default(), fragment)?;
            render_frames(&args, &mesh, &orbit, &mut device, r, |r, vp, eye| {
                r.vertex_shader_mut().view_projection = vp;
                r.fragment_shader_mut().camera_pos = eye;
            })?
        }
        Shading::Textured => {
            let path = args
                .texture
                .as_ref()
                .context("--shading textured needs --texture")?;
            let mut shader = TexturedShader::new(Arc::new(Texture::open(path)?));
            shader.light_dir = Vec3::new(1.0, 2.0, 1.5);
            let r = Rasterizer::new(config, target, shader.clone(), shader)?;
            render_frames(&args, &mesh, &orbit, &mut device, r, |r, vp, eye| {
                r.vertex_shader_mut().view_projection = vp;
                r.fragment_shader_mut().camera_pos = eye;
            })?
        }
    };

    device.replace_sink(PngSink::new(&args.out));
    device.flush()?;
    eprintln!("wrote {}", args.out.display());

    println!(
        "last frame: {} triangles, {} fragments emitted, {} written",
        stats.triangles, stats.fragments_emitted, stats.fragments_written
    );
    if let Some(timings) = FrameTimings::from_durations(&timings) {
        println!("{timings}");
    }
    Ok(())
}

fn render_frames<VS, FS>(
    args: &RenderArgs,
    mesh: &Mesh,
    orbit: &Orbit,
    device: &mut Device,
    mut rasterizer: Rasterizer<VS, FS>,
    mut set_camera: impl FnMut(&mut Rasterizer<VS, FS>, Mat4, Vec3),
) -> anyhow::Result<(Vec<Duration>, FrameStats)>
where
    VS: VertexShader<Input = Vertex>,
    FS: FragmentShader<Input = VS::Output>,
{
    let mut timings = Vec::with_capacity(args.frames as usize);
    let mut stats = FrameStats::default();
    let mut edges = Vec::new();

    for frame in 0..args.frames {
        let (eye, view_projection) = orbit.at(frame, args.frames);
        set_camera(&mut rasterizer, view_projection, eye);

        let started = Instant::now();
        device.clear();
        stats = rasterizer
            .draw_mesh(mesh)
            .with_context(|| format!("draw frame {frame}"))?;
        if args.wireframe {
            edges.clear();
            edges.extend(mesh.vertices.iter().map(|v| view_projection * v.pos.extend(1.0)));
            softraster::draw_wireframe(
                device.target(),
                &edges,
                &mesh.indices,
                Vec4::new(0.0, 1.0, 0.0, 1.0),
                rasterizer.config().clip_convention,
            )?;
        }
        timings.push(started.elapsed());

        if args.fbdev.is_some() {
            device.flush()?;
        }
    }
    Ok((timings, stats))
}
