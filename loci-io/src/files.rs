use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use log::{debug, trace};

use loci_core::models::{ClusterSet, LocusSet};

use crate::consts::GZ_EXTENSION;
use crate::error::{Result, TranslateError};
use crate::translator::Format;

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(GZ_EXTENSION))
}

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
/// - path: path to the file to read
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let file = File::open(path)?;
    let file: Box<dyn Read> = match is_gzipped(path) {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Write lines to disk, gzipped when the path ends in `.gz`. Parent
/// directories are created as needed.
///
/// # Arguments
/// - path: the path to the file to dump to
/// - lines: lines to write, each followed by a newline
pub fn write_lines<P, I>(path: P, lines: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = String>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;

    if is_gzipped(path) {
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());
        for line in lines {
            writeln!(encoder, "{}", line)?;
        }
        encoder.finish()?.flush()?;
    } else {
        let mut writer = BufWriter::new(file);
        for line in lines {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
    }

    Ok(())
}

///
/// Read a file into a [`LocusSet`], picking the translator from the file name.
///
/// The set is named after the file name, and every locus records that name as
/// its collection name.
///
pub fn read_locus_set<P: AsRef<Path>>(path: P) -> Result<LocusSet> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let reader = get_dynamic_reader(path)?;
    read_locus_set_with(format, reader, &name)
}

///
/// Read lines from any buffered reader with the translator of `format`.
///
/// Lines are trimmed before decoding. A line that fails to decode aborts the
/// read with [`TranslateError::AtLine`].
///
/// # Arguments
/// - format: translation scheme of the input
/// - reader: source of lines
/// - name: name of the resulting set and collection name of its loci
pub fn read_locus_set_with<R: BufRead>(format: Format, reader: R, name: &str) -> Result<LocusSet> {
    let translator = format.translator();
    let mut set = LocusSet::new(name);

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let decoded = translator
            .decode(line.trim())
            .map_err(|e| TranslateError::AtLine {
                set: name.to_string(),
                line: index + 1,
                source: Box::new(e),
            })?;

        match decoded {
            Some(mut locus) => {
                locus.set_name = Some(name.to_string());
                set.add_locus(locus);
            }
            None => trace!("Skipping line {} of {}", index + 1, name),
        }
    }

    debug!("Read {} loci from {} as {}", set.len(), name, format);
    Ok(set)
}

///
/// Write a set to disk, one encoded locus per line, after any header lines.
///
/// # Arguments
/// - set: loci to write, in order
/// - path: destination, gzipped if it ends in `.gz`
/// - format: translation scheme; `None` picks it from the path
/// - header_lines: lines written verbatim before the loci
pub fn write_locus_set<P: AsRef<Path>>(
    set: &LocusSet,
    path: P,
    format: Option<Format>,
    header_lines: &[String],
) -> Result<()> {
    let path = path.as_ref();
    let format = match format {
        Some(format) => format,
        None => Format::from_path(path)?,
    };
    let translator = format.translator();

    let lines = header_lines
        .iter()
        .cloned()
        .chain(set.iter().map(|locus| translator.encode(locus)));
    write_lines(path, lines)?;

    debug!("Wrote {} loci of '{}' to {:?}", set.len(), set.name(), path);
    Ok(())
}

///
/// Write one rendered line per cluster, after any header lines.
///
pub fn write_cluster_set<P: AsRef<Path>>(
    set: &ClusterSet,
    path: P,
    header_lines: &[String],
) -> Result<()> {
    let path = path.as_ref();

    let lines = header_lines
        .iter()
        .cloned()
        .chain(set.iter().map(|cluster| cluster.render_line()));
    write_lines(path, lines)?;

    debug!("Wrote {} clusters of '{}' to {:?}", set.len(), set.name(), path);
    Ok(())
}
