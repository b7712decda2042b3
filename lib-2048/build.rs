use std::{
    env,
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use core_2048::tables::{self, RowTables};

fn write_table<T: Display>(file_path: &impl AsRef<Path>, items: &[T]) -> io::Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);

    writer.write_all(b"[")?;

    for item in items {
        write!(writer, "{item},")?;
    }

    writer.write_all(b"]\n")?;
    writer.flush()
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var_os("OUT_DIR")
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "OUT_DIR not set"))?;
    let out_dir_path = Path::new(&out_dir);

    let RowTables {
        row_left,
        row_right,
        score,
    } = tables::build_tables();

    write_table(&out_dir_path.join("row_left_table.rs"), &row_left[..])?;
    write_table(&out_dir_path.join("row_right_table.rs"), &row_right[..])?;
    write_table(&out_dir_path.join("score_table.rs"), &score[..])
}
