//! Integration tests for table loading from disk.

use std::fs;
use tempfile::tempdir;

use sekolah_data::{DataError, TableReader};

/// A realistic extract of the schools dataset loads with every column intact.
#[test]
fn test_read_schools_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("schools.csv");
    fs::write(
        &path,
        "npsn,nama,bentuk_pendidikan,status,alamat,kelurahan,kecamatan,kab_kota,provinsi,lat,lon,updated_at\n\
         20100001,SDN 1 Banda Aceh,SD,NEGERI,\"Jl. Merdeka, No. 1\",Peuniti,Baiturrahman,Kota Banda Aceh,Aceh,5.55,95.32,2024-01-01\n\
         20100002,SMPN 2 Medan,SMP,NEGERI,Jl. Sudirman,Petisah,Medan Petisah,Kota Medan,Sumatera Utara,3.59,98.67,2024-01-02\n",
    )
    .unwrap();

    let table = TableReader::read_path(&path).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.headers().len(), 12);
    assert_eq!(table.stats.ragged_rows, 0);

    let first = &table.records()[0];
    assert_eq!(first.get("alamat"), Some("Jl. Merdeka, No. 1"));
    assert_eq!(first.trimmed("lat"), "5.55");
}

/// Ragged rows never abort a load.
#[test]
fn test_read_ragged_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("broken.csv");
    fs::write(&path, "npsn,nama\nvalid,valid\ninvalid row without proper csv\n1,2,3\n").unwrap();

    let table = TableReader::read_path(&path).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.stats.ragged_rows, 2);
    assert_eq!(table.records()[2].get("nama"), Some("2"));
}

#[test]
fn test_read_directory_is_not_found() {
    let temp = tempdir().unwrap();

    let err = TableReader::read_path(temp.path()).unwrap_err();
    assert!(matches!(err, DataError::NotFound(_)));
}
