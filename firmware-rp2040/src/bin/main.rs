#![no_std]
#![no_main]

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::flash::Flash;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use remap_pad_rp2040::{
    configure_gamepad_hid, configure_mapping_hid, translate, ActiveTable, FlashStorage,
    HoldGesture, MappingRequestHandler, MappingStore, PadReport, PadWriter, PhysicalButton,
    RecordOrigin, RuntimeMode, SwitchBank, ACTIVE_RECORD, DIRECTIONAL_HOLD_TICKS,
    TABLE_TOGGLE_HOLD_TICKS, TABLE_WRITES,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Switch polling interval. The gesture hold thresholds count these cycles.
const POLL_INTERVAL: Duration = Duration::from_millis(4);

/// Signal for passing reports from the polling task to the output task.
/// Using Signal instead of Channel provides "latest value wins" semantics,
/// which is appropriate here since only the most recent switch sample matters.
static REPORT_SIGNAL: StaticCell<Signal<CriticalSectionRawMutex, PadReport>> = StaticCell::new();

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Per-interface HID state.
static GAMEPAD_HID_STATE: StaticCell<State> = StaticCell::new();
static MAPPING_HID_STATE: StaticCell<State> = StaticCell::new();

/// The request handler is borrowed by the USB stack for 'static.
static MAPPING_HANDLER: StaticCell<MappingRequestHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Remap pad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // Initialize the report signal (latest-value semantics)
    let signal = REPORT_SIGNAL.init(Signal::new());

    // --- Mapping Record Load ---
    let flash = Flash::new_blocking(p.FLASH);
    let mut storage = FlashStorage::new(flash);
    let (store, origin) = MappingStore::load(&mut storage);
    match origin {
        RecordOrigin::Stored => info!("Mapping record loaded from flash"),
        RecordOrigin::FactoryDefault => {
            warn!("No valid mapping record, running factory defaults")
        }
    }
    // Publish the record before the USB device can field requests.
    ACTIVE_RECORD.lock(|record| record.set(*store.record()));

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
    usb_config.manufacturer = Some("Rust Gamepad");
    usb_config.product = Some("Remap Pad");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure the HID interfaces: gamepad first (interface 0), then the
    // configuration interface (interface 1).
    let gamepad_state = GAMEPAD_HID_STATE.init(State::new());
    let gamepad_writer = configure_gamepad_hid(&mut builder, gamepad_state);

    let mapping_state = MAPPING_HID_STATE.init(State::new());
    let mapping_handler = MAPPING_HANDLER.init(MappingRequestHandler);
    let _mapping_writer = configure_mapping_hid(&mut builder, mapping_state, mapping_handler);

    // Build the USB device
    let usb_device = builder.build();

    // Create output
    let usb_output = PadWriter::new(gamepad_writer);

    // --- Switch Setup ---
    let switches = SwitchBank::new(
        [
            Input::new(p.PIN_2, Pull::Up), // A
            Input::new(p.PIN_3, Pull::Up), // B
            Input::new(p.PIN_4, Pull::Up), // X
            Input::new(p.PIN_5, Pull::Up), // Y
            Input::new(p.PIN_6, Pull::Up), // L
            Input::new(p.PIN_7, Pull::Up), // R
            Input::new(p.PIN_8, Pull::Up), // Start
            Input::new(p.PIN_9, Pull::Up), // Select
        ],
        Input::new(p.PIN_10, Pull::Up), // up
        Input::new(p.PIN_11, Pull::Up), // down
        Input::new(p.PIN_12, Pull::Up), // left
        Input::new(p.PIN_13, Pull::Up), // right
    );

    // On-board LED indicates the active table (lit = special)
    let led = Output::new(p.PIN_25, Level::Low);

    // Spawn tasks
    spawner.spawn(usb_task(usb_device)).unwrap();
    spawner.spawn(input_task(switches, signal, led)).unwrap();
    spawner.spawn(output_task(usb_output, signal)).unwrap();
    spawner.spawn(config_task(store, storage)).unwrap();

    info!("Remap pad initialized");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Polling task - samples the switches every cycle, advances the hold
/// gestures, and signals the translated report.
#[embassy_executor::task]
async fn input_task(
    switches: SwitchBank,
    signal: &'static Signal<CriticalSectionRawMutex, PadReport>,
    mut led: Output<'static>,
) {
    let mut mode = RuntimeMode::BOOT;
    let mut table_gesture = HoldGesture::new(TABLE_TOGGLE_HOLD_TICKS);
    let mut directional_gesture = HoldGesture::new(DIRECTIONAL_HOLD_TICKS);
    let mut ticker = Ticker::every(POLL_INTERVAL);

    loop {
        ticker.next().await;
        let sample = switches.sample();

        if table_gesture.advance(sample.combo_held(PhysicalButton::Start, PhysicalButton::R)) {
            mode.toggle_table();
            if mode.active_table == ActiveTable::Special {
                led.set_high();
            } else {
                led.set_low();
            }
            info!("Active table: {:?}", mode.active_table);
        }
        if directional_gesture
            .advance(sample.combo_held(PhysicalButton::Start, PhysicalButton::L))
        {
            mode.cycle_directional();
            info!("Directional mode: {:?}", mode.directional);
        }

        let record = ACTIVE_RECORD.lock(|record| record.get());
        signal.signal(translate(&sample, &record, mode));
    }
}

/// Output task - waits for report signals and sends them to USB HID.
#[embassy_executor::task]
async fn output_task(
    mut output: PadWriter<'static>,
    signal: &'static Signal<CriticalSectionRawMutex, PadReport>,
) {
    // Wait for USB to be ready
    output.wait_ready().await;
    info!("USB HID ready, forwarding reports...");

    loop {
        // Wait for the next report (blocks until signaled)
        let report = signal.wait().await;
        if let Err(e) = output.send(&report).await {
            error!("Output error: {:?}", e);
        }
    }
}

/// Config task - commits host mapping writes to flash, then publishes the
/// new record to the polling task and the USB callbacks.
#[embassy_executor::task]
async fn config_task(mut store: MappingStore, mut storage: FlashStorage) {
    loop {
        let update = TABLE_WRITES.wait().await;
        match store.save(&mut storage, &update.normal, &update.special) {
            Ok(()) => {
                ACTIVE_RECORD.lock(|record| record.set(*store.record()));
                info!("Mapping record saved");
            }
            Err(e) => {
                // The old record stays in effect in memory; the host sees
                // it again on its next read-back.
                error!("Mapping save failed: {:?}", e);
            }
        }
    }
}
