#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("mobius_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use mobius_engine::geom::{
        DEFAULT_PRECISION, EdgeDiagnostics, EdgeStitching, GeomMesh, GeomMetrics, MeasureOptions,
        MobiusParams, MobiusStrip, TimingBucket,
    };
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const EXAMPLE_RADIUS: f64 = 1.0;
    const EXAMPLE_WIDTH: f64 = 0.4;
    const EXAMPLE_RESOLUTION: usize = 150;

    const USAGE: &str = r#"mobius_cli (mobius-engine)

USAGE:
  mobius_cli measure  [shape options] [--precision <digits>] [--stitching <name>]
  mobius_cli export   --obj <path> [shape options] [--overwrite]
  mobius_cli snapshot [shape options] [--snap <path>] [--overwrite]
  mobius_cli diagnose [shape options]
  mobius_cli help

SHAPE OPTIONS:
  --radius <R>         Central radius, > 0 (default 1.0)
  --width <W>          Strip width, >= 0 (default 0.4)
  --resolution <N>     Samples per parametric axis, >= 2 (default 150)

OTHER OPTIONS:
  --precision <digits> Decimals kept in measurements (default 14)
  --stitching <name>   Edge stitching: mirrored (default), reversed, continuous
  --obj <path>         OBJ output path
  --snap <path>        Snapshot output path (stdout when omitted)
  --overwrite          Overwrite existing output files
  -h, --help           Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "measure" => cmd_measure(&mut args),
            "export" => cmd_export(&mut args),
            "snapshot" => cmd_snapshot(&mut args),
            "diagnose" => cmd_diagnose(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    #[derive(Debug)]
    struct Options {
        params: MobiusParams,
        precision: u32,
        stitching: EdgeStitching,
        obj_path: Option<PathBuf>,
        snap_path: Option<PathBuf>,
        overwrite: bool,
        help: bool,
    }

    impl Default for Options {
        fn default() -> Self {
            Self {
                params: MobiusParams::new(EXAMPLE_RADIUS, EXAMPLE_WIDTH, EXAMPLE_RESOLUTION),
                precision: DEFAULT_PRECISION,
                stitching: EdgeStitching::default(),
                obj_path: None,
                snap_path: None,
                overwrite: false,
                help: false,
            }
        }
    }

    fn parse_options(args: &mut Args, allowed: &[&str]) -> Result<Options, String> {
        let mut options = Options::default();

        while let Some(arg) = args.next() {
            let flag = arg.as_str();
            if flag == "-h" || flag == "--help" {
                options.help = true;
                continue;
            }
            let is_shape = matches!(flag, "--radius" | "--width" | "--resolution");
            if !is_shape && !allowed.contains(&flag) {
                return Err(format!("unknown option `{flag}`\n\n{USAGE}"));
            }

            match flag {
                "--radius" => options.params.central_radius = parse_number(flag, &args.value(flag)?)?,
                "--width" => options.params.width = parse_number(flag, &args.value(flag)?)?,
                "--resolution" => options.params.resolution = parse_number(flag, &args.value(flag)?)?,
                "--precision" => options.precision = parse_number(flag, &args.value(flag)?)?,
                "--stitching" => {
                    let name = args.value(flag)?;
                    options.stitching = EdgeStitching::from_name(&name)
                        .ok_or_else(|| unknown_stitching(&name))?;
                }
                "--obj" => options.obj_path = Some(PathBuf::from(args.value(flag)?)),
                "--snap" => options.snap_path = Some(PathBuf::from(args.value(flag)?)),
                "--overwrite" => options.overwrite = true,
                _ => return Err(format!("unknown option `{flag}`\n\n{USAGE}")),
            }
        }

        Ok(options)
    }

    fn parse_number<T: std::str::FromStr>(flag: &str, raw: &str) -> Result<T, String>
    where
        T::Err: std::fmt::Display,
    {
        raw.trim()
            .parse()
            .map_err(|e| format!("invalid value `{raw}` for {flag}: {e}"))
    }

    fn unknown_stitching(name: &str) -> String {
        let mut msg = format!("unknown stitching `{name}`\n\navailable stitchings:\n");
        for stitching in EdgeStitching::ALL {
            let _ = writeln!(msg, "  {}", stitching.name());
        }
        msg
    }

    fn build_strip(params: MobiusParams, metrics: &mut GeomMetrics) -> Result<MobiusStrip, String> {
        MobiusStrip::new_with_metrics(params, metrics).map_err(|e| e.to_string())
    }

    fn cmd_measure(args: &mut Args) -> Result<(), String> {
        let options = parse_options(args, &["--precision", "--stitching"])?;
        if options.help {
            print_usage();
            return Ok(());
        }

        let mut metrics = GeomMetrics::default();
        metrics.begin();
        let strip = build_strip(options.params, &mut metrics)?;
        let measurements = strip.measure(
            MeasureOptions {
                precision: options.precision,
                stitching: options.stitching,
            },
            &mut metrics,
        );

        println!("Surface Area: {}", measurements.surface_area);
        println!("Edge Length: {}", measurements.edge_length);

        if let Some(report) = metrics.end() {
            eprintln!("timings: total={:.3}ms", report.total_ms());
        }
        Ok(())
    }

    fn cmd_export(args: &mut Args) -> Result<(), String> {
        let options = parse_options(args, &["--obj", "--overwrite"])?;
        if options.help {
            print_usage();
            return Ok(());
        }
        let path = options.obj_path.as_deref().ok_or("export requires --obj <path>")?;

        let strip = build_strip(options.params, &mut GeomMetrics::default())?;
        let mesh = strip.to_geom_mesh();
        write_obj_file(path, &mesh, "mobius_strip", options.overwrite)?;
        eprintln!("wrote {}", path.display());
        eprintln!(
            "mobius_strip: vertices={} triangles={}",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(())
    }

    fn cmd_snapshot(args: &mut Args) -> Result<(), String> {
        let options = parse_options(args, &["--snap", "--overwrite"])?;
        if options.help {
            print_usage();
            return Ok(());
        }

        let strip = build_strip(options.params, &mut GeomMetrics::default())?;
        let text = strip_snapshot(&strip)?;

        if let Some(path) = options.snap_path.as_deref() {
            write_text_file(path, &text, options.overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{text}");
        }
        Ok(())
    }

    fn cmd_diagnose(args: &mut Args) -> Result<(), String> {
        let options = parse_options(args, &[])?;
        if options.help {
            print_usage();
            return Ok(());
        }

        let mut metrics = GeomMetrics::default();
        metrics.begin();
        let strip = build_strip(options.params, &mut metrics)?;
        for &stitching in EdgeStitching::ALL {
            let diag = metrics.time(TimingBucket::Diagnostics, || {
                strip.edge_diagnostics(stitching)
            });
            print!("{diag}");
        }
        if let Some(report) = metrics.end() {
            eprintln!("timings: total={:.3}ms", report.total_ms());
        }
        Ok(())
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, mesh: &GeomMesh, name: &str, overwrite: bool) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;

        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# mobius-engine mobius_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

        for p in mesh.positions.iter().copied() {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
        }

        if let Some(uvs) = mesh.uvs.as_ref() {
            for uv in uvs.iter().copied() {
                writeln!(w, "vt {} {}", uv[0], uv[1]).map_err(|e| format!("write obj: {e}"))?;
            }
        }

        if let Some(normals) = mesh.normals.as_ref() {
            for n in normals.iter().copied() {
                writeln!(w, "vn {} {} {}", n[0], n[1], n[2]).map_err(|e| format!("write obj: {e}"))?;
            }
        }

        let has_uvs = mesh.uvs.is_some();
        let has_normals = mesh.normals.is_some();

        for tri in mesh.indices.chunks_exact(3) {
            let a = tri[0] + 1;
            let b = tri[1] + 1;
            let c = tri[2] + 1;

            match (has_uvs, has_normals) {
                (true, true) => writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}"),
                (true, false) => writeln!(w, "f {a}/{a} {b}/{b} {c}/{c}"),
                (false, true) => writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}"),
                (false, false) => writeln!(w, "f {a} {b} {c}"),
            }
            .map_err(|e| format!("write obj: {e}"))?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let value = if value == -0.0 { 0.0 } else { value };
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        if q == -0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    fn write_f64_line(out: &mut String, key: &str, value: f64) {
        let _ = write!(out, "{key} ");
        write_f64(out, value);
        out.push('\n');
    }

    fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
        let _ = write!(out, "{prefix} ");
        write_f64(out, v[0]);
        out.push(' ');
        write_f64(out, v[1]);
        out.push(' ');
        write_f64(out, v[2]);
        out.push('\n');
    }

    fn write_edge_diagnostics(out: &mut String, diag: &EdgeDiagnostics) {
        let key = format!("edge.{}", diag.stitching.name());
        write_f64_line(out, &format!("{key}.length"), diag.length);
        let _ = writeln!(out, "{key}.segment_count {}", diag.segment_count);
        let _ = writeln!(out, "{key}.degenerate_segment_count {}", diag.degenerate_segment_count);
        write_f64_line(out, &format!("{key}.seam_gap"), diag.seam_gap);
        write_f64_line(out, &format!("{key}.closure_gap"), diag.closure_gap);
        let _ = writeln!(out, "{key}.warnings {}", diag.warnings.len());
    }

    fn strip_snapshot(strip: &MobiusStrip) -> Result<String, String> {
        let params = strip.params();
        let mesh = strip.to_geom_mesh();
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;
        let (rows, cols) = strip.mesh().shape();

        let mut out = String::new();
        let _ = writeln!(out, "# mobius-engine golden v1");
        let _ = writeln!(out, "op mobius_strip");
        let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
        write_f64_line(&mut out, "params.central_radius", params.central_radius);
        write_f64_line(&mut out, "params.width", params.width);
        let _ = writeln!(out, "params.resolution {}", params.resolution);

        write_f64_line(&mut out, "surface_area", strip.raw_surface_area());
        for &stitching in EdgeStitching::ALL {
            write_edge_diagnostics(&mut out, &strip.edge_diagnostics(stitching));
        }

        let _ = writeln!(out, "mesh.vertex_count {}", mesh.vertex_count());
        let _ = writeln!(out, "mesh.triangle_count {}", mesh.triangle_count());
        write_f64_line(&mut out, "mesh.triangle_area", mesh.triangle_area());
        if let Some(bounds) = strip.mesh().bounds() {
            write_vec3_line(&mut out, "mesh.bounds.min", bounds.min.to_array());
            write_vec3_line(&mut out, "mesh.bounds.max", bounds.max.to_array());
        }

        let last_row = rows.saturating_sub(1);
        let last_col = cols.saturating_sub(1);
        for (i, j) in [(0, 0), (0, last_col), (last_row, 0), (last_row, last_col)] {
            if let Some(p) = strip.mesh().point(i, j) {
                write_vec3_line(&mut out, &format!("corner {i} {j}"), p.to_array());
            }
        }

        Ok(normalize_snapshot_text(&out))
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next().ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
