#![no_std]
#![no_main]

use cortex_m::delay::Delay;
use fugit::RateExtU32;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{
    Clock, I2C, Sio, Timer,
    clocks::init_clocks_and_plls,
    gpio::{
        FunctionI2C, Pin, PullUp,
        bank0::{Gpio6, Gpio14, Gpio15},
    },
    pac::{self, interrupt},
    watchdog::Watchdog,
};
use rtt_target::{rprintln, rtt_init_print};
use ssd1306::{I2CDisplayInterface, prelude::I2CInterface};
use static_cell::StaticCell;

use rp_pico_countdown::button::PicoButton;
use rp_pico_countdown::oled::OledSurface;
use rp_pico_countdown::scheduler::AlarmScheduler;
use rp_pico_countdown::time::HardwareTimer;

use countdown_timer::{
    ButtonInterrupt, Config, CountdownController, Edge, PressOutcome, SharedController,
    WELCOME_DURATION_MS,
};

/// I2C1 with SDA on GPIO14 and SCL on GPIO15
type I2cBus = I2C<
    pac::I2C1,
    (
        Pin<Gpio14, FunctionI2C, PullUp>,
        Pin<Gpio15, FunctionI2C, PullUp>,
    ),
>;

/// `None` when the panel failed to initialize
type Display = Option<OledSurface<I2CInterface<I2cBus>>>;

type Controller = CountdownController<Display, AlarmScheduler>;

static TIME_SOURCE: StaticCell<HardwareTimer> = StaticCell::new();
static COUNTDOWN: SharedController<Controller> = SharedController::new();
static BUTTON: SharedController<ButtonInterrupt<PicoButton<Gpio6>>> = SharedController::new();

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== RP Pico Countdown Timer ===");
    rprintln!("Starting initialization...");

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    // Set up the Single Cycle IO (for GPIO access)
    let sio = Sio::new(pac.SIO);

    // Set the pins to their default state
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // OLED on I2C1 at 400 kHz, address 0x3C
    let sda: Pin<Gpio14, FunctionI2C, PullUp> = pins.gpio14.reconfigure();
    let scl: Pin<Gpio15, FunctionI2C, PullUp> = pins.gpio15.reconfigure();
    let i2c = I2C::i2c1(
        pac.I2C1,
        sda,
        scl,
        400.kHz(),
        &mut pac.RESETS,
        clocks.system_clock.freq(),
    );

    let display: Display = match OledSurface::init(I2CDisplayInterface::new(i2c)) {
        Ok(surface) => Some(surface),
        Err(err) => {
            rprintln!("SSD1306 init failed ({:?}), running headless", err);
            None
        }
    };

    // Alarm 0 drives the one-second tick
    let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let alarm = timer.alarm_0().unwrap();
    let time_source: &'static HardwareTimer = TIME_SOURCE.init(HardwareTimer::new(timer));
    let scheduler = AlarmScheduler::new(time_source, alarm);

    let mut controller = CountdownController::new(display, scheduler, Config::default())
        .expect("default config is valid");

    let mut delay = Delay::new(core.SYST, clocks.system_clock.freq().to_Hz());
    controller.show_welcome();
    delay.delay_ms(WELCOME_DURATION_MS);
    controller.show_menu();

    // Button B on GPIO6, active low
    let button = ButtonInterrupt::configure(
        PicoButton::new(pins.gpio6.into_pull_up_input()),
        Edge::Falling,
    );

    COUNTDOWN.install(controller);
    BUTTON.install(button);

    // Nothing can interrupt the boot screens
    unsafe {
        pac::NVIC::unmask(pac::Interrupt::TIMER_IRQ_0);
        pac::NVIC::unmask(pac::Interrupt::IO_IRQ_BANK0);
    }

    rprintln!("=== Ready, press B to start ===");

    loop {
        cortex_m::asm::wfi();
    }
}

#[interrupt]
fn TIMER_IRQ_0() {
    COUNTDOWN.with(|controller| controller.service());
}

#[interrupt]
fn IO_IRQ_BANK0() {
    BUTTON.with(|button| {
        button.handle(|| {
            let pressed = COUNTDOWN.with(|controller| {
                controller
                    .on_button_press()
                    .map(|outcome| (outcome, controller.handle()))
            });
            match pressed {
                Some(Ok((PressOutcome::Started, Some(handle)))) => {
                    rprintln!("countdown started as task {}", handle.id())
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => rprintln!("press dropped: {}", err),
                None => {}
            }
        })
    });
}
