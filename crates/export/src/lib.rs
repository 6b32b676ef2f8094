//! Export helpers for CSV trajectories and JSON run summaries.

pub mod trajectory {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    pub const HEADER: &str = "body,t_s,x_m,y_m,z_m,vx_m_s,vy_m_s,vz_m_s";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One sample of one body's trajectory. 2D runs carry zeros in the
    /// third components.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub body: &'a str,
        pub t_s: f64,
        pub position_m: [f64; 3],
        pub velocity_m_s: [f64; 3],
    }

    impl<'a> Record<'a> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
                self.body,
                self.t_s,
                self.position_m[0],
                self.position_m[1],
                self.position_m[2],
                self.velocity_m_s[0],
                self.velocity_m_s[1],
                self.velocity_m_s[2],
            )
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// Endpoint diagnostics for one integrated body.
    #[derive(Debug, Clone, Serialize)]
    pub struct BodySummary {
        pub name: String,
        pub samples: usize,
        pub t_start_s: f64,
        pub t_end_s: f64,
        pub initial_radius_m: f64,
        pub final_radius_m: f64,
        pub initial_specific_energy_j_kg: f64,
        pub final_specific_energy_j_kg: f64,
    }

    /// Envelope written as a pretty-JSON sidecar next to the CSV.
    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub generated_utc: String,
        pub scenario: String,
        pub gravitational_constant: f64,
        pub central_mass_kg: f64,
        pub bodies: Vec<BodySummary>,
    }

    /// Write the run summary, creating parent directories as needed.
    pub fn write_summary(path: &Path, summary: &RunSummary) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(path)?, summary)?;
        Ok(())
    }
}
