use libplatform::mock::{MockClock, MockSerial, OUTPUT_CAPACITY, TX_FIFO_LEN};
use libplatform::serial::{LineConfig, Parity, Serial, format_radix};

fn open(clock: &MockClock, speed: u32) -> MockSerial<'_> {
    let mut serial = MockSerial::new(clock);
    serial.begin(speed);
    serial
}

#[test]
fn test_begin_variants() {
    let clock = MockClock::new();
    let mut serial = MockSerial::new(&clock);
    assert_eq!(serial.speed(), None);

    serial.begin(9600);
    assert_eq!(serial.speed(), Some(9600));
    assert_eq!(serial.config(), LineConfig::DEFAULT);

    serial.begin_with_config(19_200, LineConfig::SERIAL_8E1);
    assert_eq!(serial.speed(), Some(19_200));
    assert_eq!(serial.config(), LineConfig::SERIAL_8E1);

    serial.begin_signed(115_200);
    assert_eq!(serial.speed(), Some(115_200));
    assert_eq!(serial.config(), LineConfig::DEFAULT);

    serial.begin_signed(-1);
    assert_eq!(serial.speed(), Some(115_200));
}

#[test]
fn test_write_before_begin_is_rejected() {
    let clock = MockClock::new();
    let mut serial = MockSerial::new(&clock);
    assert_eq!(serial.print_str("lost"), 0);
    serial.flush();
    assert_eq!(serial.output(), "");
}

#[test]
fn test_print_family_counts_bytes() {
    let clock = MockClock::new();
    let mut serial = open(&clock, 115_200);

    assert_eq!(serial.print_str("t="), 2);
    assert_eq!(serial.print_int(-42), 3);
    assert_eq!(serial.print_uint(7), 1);
    assert_eq!(serial.print_float(3.14159), 4);
    assert_eq!(serial.print_double(2.5), 4);
    assert_eq!(serial.print_radix(255, 16), 2);
    assert_eq!(serial.print_time(1_700_000_000), 10);
    assert_eq!(serial.println(), 2);
    serial.flush();

    assert_eq!(serial.output(), "t=-4273.142.50FF1700000000\r\n");
}

#[test]
fn test_println_family() {
    let clock = MockClock::new();
    let mut serial = open(&clock, 115_200);

    assert_eq!(serial.println_str("boot"), 6);
    assert_eq!(serial.println_int(-1), 4);
    assert_eq!(serial.println_uint(10), 4);
    assert_eq!(serial.println_radix(5, 2), 5);
    assert_eq!(serial.println_time(0), 3);
    serial.flush();

    assert_eq!(serial.output(), "boot\r\n-1\r\n10\r\n101\r\n0\r\n");
}

#[test]
fn test_print_fmt() {
    let clock = MockClock::new();
    let mut serial = open(&clock, 115_200);
    let n = serial.print_fmt(format_args!("{}:{:02}", 7, 5));
    serial.flush();
    assert_eq!(n, 4);
    assert_eq!(serial.output(), "7:05");
}

#[test]
fn test_radix_formatting() {
    let mut buf = [0u8; 32];
    assert_eq!(format_radix(0, 2, &mut buf), b"0");
    assert_eq!(format_radix(u32::MAX, 2, &mut buf), [b'1'; 32].as_slice());
    assert_eq!(format_radix(35, 36, &mut buf), b"Z");
    assert_eq!(format_radix(10, 1, &mut buf), b"10");
    assert_eq!(format_radix(10, 37, &mut buf), b"10");
}

#[test]
fn test_flush_empties_pending_and_takes_line_time() {
    let clock = MockClock::new();
    let mut serial = open(&clock, 9600);

    serial.print_str("hello\r\n");
    assert_eq!(serial.pending(), b"hello\r\n");
    assert_eq!(clock.uptime_ms(), 0);

    serial.flush();
    assert!(serial.pending().is_empty());
    assert_eq!(serial.output(), "hello\r\n");
    // 7 frames of 10 bits at 9600 baud.
    assert_eq!(clock.uptime_ms(), 8);
}

#[test]
fn test_full_fifo_blocks_writer() {
    let clock = MockClock::new();
    let mut serial = open(&clock, 9600);

    let data = [b'x'; 100];
    assert_eq!(serial.write_bytes(&data), 100);
    assert_eq!(serial.pending().len(), 100 - TX_FIFO_LEN);
    assert_eq!(clock.uptime_ms(), 67);

    serial.flush();
    assert_eq!(serial.transmitted(), 100);
    assert_eq!(clock.uptime_ms(), 105);
}

#[test]
fn test_frame_size_affects_transmit_time() {
    let clock = MockClock::new();
    let mut serial = MockSerial::new(&clock);
    serial.begin_with_config(1000, LineConfig::SERIAL_8N2);
    assert_eq!(serial.transmit_time_ms(10), 110);
    serial.begin_with_config(1000, LineConfig::SERIAL_7E1);
    assert_eq!(serial.transmit_time_ms(10), 100);
}

#[test]
fn test_output_capacity() {
    let clock = MockClock::new();
    let mut serial = open(&clock, 1_000_000);
    let chunk = [b'a'; 100];
    for _ in 0..12 {
        serial.write_bytes(&chunk);
    }
    serial.flush();
    assert_eq!(serial.transmitted(), 1200);
    assert_eq!(serial.output_bytes().len(), OUTPUT_CAPACITY);

    serial.clear_output();
    assert_eq!(serial.output(), "");
}

#[test]
fn test_line_config_fields() {
    let config = LineConfig::SERIAL_7E1;
    assert_eq!(config.data_bits(), 7);
    assert_eq!(config.parity(), Parity::Even);
    assert_eq!(config.stop_bits(), 1);
    assert_eq!(config.bits_per_frame(), 10);

    assert_eq!(LineConfig::SERIAL_8O1.parity(), Parity::Odd);
    assert_eq!(LineConfig::SERIAL_8N1.bits_per_frame(), 10);
    assert_eq!(LineConfig::SERIAL_8N2.bits_per_frame(), 11);
    assert_eq!(LineConfig::from(0), LineConfig::DEFAULT);
}
