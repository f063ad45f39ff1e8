use std::io::Write as _;

use flate2::{Compression, write::ZlibEncoder};
use prost::Message as _;

use super::*;
use crate::format::schema::{MovieEntity, MovieParams};

fn container() -> Vec<u8> {
    let movie = MovieEntity {
        params: Some(MovieParams {
            view_box_width: 64.0,
            view_box_height: 64.0,
            fps: 25,
            frames: 50,
        }),
        ..Default::default()
    };
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(&movie.encode_to_vec()).unwrap();
    enc.finish().unwrap()
}

fn inline() -> Parser {
    Parser::new(ParserConfig {
        disable_worker: true,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn empty_input_is_invalid() {
    let err = inline().decode(Vec::new()).wait().unwrap_err();
    assert!(matches!(err, SvgaError::InvalidInput(_)));
}

#[test]
fn legacy_signature_is_rejected_regardless_of_tail() {
    let parser = inline();
    for tail in [&[][..], &[0u8; 8][..], &container()[..]] {
        let mut bytes = vec![0x50, 0x4B, 0x03, 0x04];
        bytes.extend_from_slice(tail);
        assert!(matches!(
            parser.decode(bytes).wait(),
            Err(SvgaError::UnsupportedVersion)
        ));
    }
}

#[test]
fn worker_and_inline_agree() {
    let worker = Parser::new(ParserConfig {
        worker_threads: Some(1),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(worker.backend_name(), Some("worker"));
    assert_eq!(inline().backend_name(), Some("inline"));

    let a = worker.decode_blocking(container()).unwrap();
    let b = inline().decode_blocking(container()).unwrap();
    assert_eq!(a.frame_count, b.frame_count);
    assert_eq!(a.fps, b.fps);
}

#[test]
fn destroy_is_idempotent_and_disables_decoding() {
    let mut parser = inline();
    parser.destroy();
    parser.destroy();
    assert_eq!(parser.backend_name(), None);
    assert!(matches!(
        parser.decode(container()).wait(),
        Err(SvgaError::WorkerUnavailable(_))
    ));
}

#[test]
fn missing_file_surfaces_io_error() {
    let err = inline()
        .decode_file("/definitely/not/here.svga")
        .wait()
        .unwrap_err();
    assert!(matches!(err, SvgaError::Other(_)));
    assert!(err.to_string().contains("read svga file"));
}

#[test]
fn config_reads_camel_case_json() {
    let cfg: ParserConfig =
        serde_json::from_str(r#"{"disableWorker":true,"assetPolicy":"skipAndReport"}"#).unwrap();
    assert!(cfg.disable_worker);
    assert_eq!(cfg.worker_threads, None);
    assert_eq!(cfg.asset_policy, AssetPolicy::SkipAndReport);
}
