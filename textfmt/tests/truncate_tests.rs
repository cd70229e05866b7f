use chunkbuf::ChunkBuf;
use textfmt::{args, format_into_with, Args, Options};

fn truncated(fmt: &str, args: &Args<'_>) -> String {
    let options = Options {
        truncate: true,
        ..Options::new()
    };
    let mut buf: ChunkBuf = ChunkBuf::new();
    format_into_with(&mut buf, fmt, args, &options).unwrap();
    String::from_utf8(buf.combine().unwrap()).unwrap()
}

#[test]
fn test_overflow_is_cut_with_ellipsis() {
    let text = "Hello, world!";
    assert_eq!(truncated("{:12}", &args!(text)), "Hello, wo...");
    assert_eq!(truncated("{:3}", &args!(text)), "...");
    assert_eq!(truncated("{:4}", &args!(text)), "H...");
    assert_eq!(truncated("{:2}", &args!(text)), "..");
    assert_eq!(truncated("{:1}", &args!(text)), ".");
}

#[test]
fn test_fitting_text_is_padded() {
    assert_eq!(truncated("{:13}", &args!("Hello, world!")), "Hello, world!");
    assert_eq!(truncated("{:6}", &args!("abc")), "abc   ");
    assert_eq!(truncated("{:>6}", &args!("abc")), "   abc");
}

#[test]
fn test_zero_width_means_no_width() {
    assert_eq!(truncated("{:{}}", &args!("abc", 0)), "abc");
    assert_eq!(truncated("{}", &args!("a much longer text")), "a much longer text");
}

#[test]
fn test_right_alignment_keeps_the_end() {
    assert_eq!(truncated("{:>5}", &args!("Hello, world!")), "...d!");
    assert_eq!(truncated("{:{}}", &args!("Hello, world!", -4)), "...!");
    assert_eq!(truncated("{:{}}", &args!("ab", -4)), "  ab");
}

#[test]
fn test_columns_are_code_points() {
    assert_eq!(truncated("{:5}", &args!("привет мир")), "пр...");
    assert_eq!(truncated("{:>4}", &args!("🤡🤡🤡🤡🤡")), "...🤡");
}

#[test]
fn test_code_points_and_quoted_text() {
    assert_eq!(truncated("{:2?}", &args!('x')), "..");
    assert_eq!(truncated("{:6q}", &args!("quoted")), "\"qu...");
}

#[test]
fn test_numbers_are_never_cut() {
    assert_eq!(truncated("{:3}", &args!(123456)), "123456");
    assert_eq!(truncated("{:3}", &args!(3.14159)), "3.14159");
}
