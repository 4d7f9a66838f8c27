#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read, Write};

    use filehash::{
        constants::HEADER_LEN,
        telemetry::{SessionSnapshot, Stage},
        StreamingReader, StreamingWriter,
    };

    #[test]
    fn writer_counts_two_header_writes() {
        let mut w = StreamingWriter::new(Cursor::new(Vec::new())).unwrap();
        w.write_all(&[1u8; 100]).unwrap();
        w.write_all(&[2u8; 50]).unwrap();
        w.finalize().unwrap();

        let s = w.snapshot();
        assert_eq!(s.header_writes, 2);
        assert_eq!(s.bytes_payload, 150);
        assert_eq!(s.payload_chunks, 2);
        assert_eq!(s.bytes_overhead, 2 * HEADER_LEN as u64);
        assert!(s.sanity_check());
    }

    #[test]
    fn reader_counts_header_read_and_payload() {
        let mut w = StreamingWriter::new(Cursor::new(Vec::new())).unwrap();
        w.write_all(b"hello world").unwrap();
        w.finalize().unwrap();
        let bytes = w.get_ref().get_ref().clone();

        let mut r = StreamingReader::from_reader(Cursor::new(bytes)).unwrap();
        let mut out = String::new();
        r.read_to_string(&mut out).unwrap();

        let s = r.snapshot();
        assert_eq!(s.header_reads, 1);
        assert_eq!(s.bytes_payload, 11);
        assert!(s.stage_times.get(Stage::Header) <= s.elapsed);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut w = StreamingWriter::new(Cursor::new(Vec::new())).unwrap();
        w.write_all(b"x").unwrap();
        w.finalize().unwrap();

        let json = serde_json::to_string(&w.snapshot()).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.bytes_payload, 1);
        assert_eq!(back.header_writes, 2);
    }
}
