use std::io::{BufRead, Write};
use std::str::FromStr;

use skyseat_core::{PassengerDetails, RowWindow, SeatId, SeatLedger, SeatStatus, SeatingError};

use crate::error::describe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    CheckAvailability,
    Book,
    Free,
    ShowStatus,
    Exit,
}

impl FromStr for MainChoice {
    type Err = SeatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MainChoice::CheckAvailability),
            "2" => Ok(MainChoice::Book),
            "3" => Ok(MainChoice::Free),
            "4" => Ok(MainChoice::ShowStatus),
            "5" => Ok(MainChoice::Exit),
            other => Err(SeatingError::Input(format!("'{}' is not a menu option", other))),
        }
    }
}

/// Line-oriented operator console. Generic over its streams so a session can
/// be scripted.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Serve menu requests until the operator exits or input runs out.
    pub async fn run(&mut self, ledger: &mut SeatLedger) -> anyhow::Result<()> {
        loop {
            self.print_main_menu()?;
            let Some(line) = self.prompt("Enter your choice (1-5): ")? else {
                writeln!(self.output)?;
                break;
            };

            match line.parse::<MainChoice>() {
                Ok(MainChoice::CheckAvailability) => self.check_availability(ledger)?,
                Ok(MainChoice::Book) => self.book_seat(ledger).await?,
                Ok(MainChoice::Free) => self.free_seat(ledger).await?,
                Ok(MainChoice::ShowStatus) => self.show_booking_status(ledger)?,
                Ok(MainChoice::Exit) => {
                    writeln!(self.output, "Exiting the program. Goodbye!")?;
                    break;
                }
                Err(_) => {
                    writeln!(self.output, "Invalid choice. Please select a valid option (1-5).")?;
                }
            }
            writeln!(self.output)?;
        }

        self.output.flush()?;
        Ok(())
    }

    fn print_main_menu(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "===== Seat-Booking System =====")?;
        writeln!(self.output, "1. Check availability of seat")?;
        writeln!(self.output, "2. Book a seat")?;
        writeln!(self.output, "3. Free a seat")?;
        writeln!(self.output, "4. Show booking status")?;
        writeln!(self.output, "5. Exit program")?;
        Ok(())
    }

    /// `None` once input is exhausted. Bytes that are not UTF-8 become U+FFFD
    /// and fail validation like any other bad answer.
    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }

    /// Ask until the answer is non-blank.
    fn prompt_required(&mut self, label: &str, field: &str) -> anyhow::Result<Option<String>> {
        loop {
            match self.prompt(label)? {
                None => return Ok(None),
                Some(value) if value.is_empty() => {
                    writeln!(self.output, "Invalid input: {} must not be empty.", field)?;
                }
                Some(value) => return Ok(Some(value)),
            }
        }
    }

    fn prompt_seat(&mut self, label: &str) -> anyhow::Result<Option<Result<SeatId, SeatingError>>> {
        Ok(self.prompt(label)?.map(|line| SeatId::parse(&line)))
    }

    fn check_availability(&mut self, ledger: &SeatLedger) -> anyhow::Result<()> {
        let Some(parsed) = self.prompt_seat("Enter the seat number (e.g., 1A, 3D): ")? else {
            return Ok(());
        };

        match parsed.and_then(|seat| ledger.query(&seat).map(|status| (seat, status))) {
            Ok((seat, SeatStatus::Free)) => {
                writeln!(self.output, "Seat {} is free and available for booking.", seat)?;
            }
            Ok((seat, SeatStatus::Booked { reference })) => {
                writeln!(self.output, "Seat {} is already booked (reference {}).", seat, reference)?;
            }
            Ok((seat, SeatStatus::Storage)) => {
                writeln!(self.output, "Seat {} is a storage area and cannot be booked.", seat)?;
            }
            Err(err) => writeln!(self.output, "{}", describe(&err))?,
        }
        Ok(())
    }

    async fn book_seat(&mut self, ledger: &mut SeatLedger) -> anyhow::Result<()> {
        let Some(parsed) = self.prompt_seat("Enter the seat number to book (e.g., 1A, 3D): ")? else {
            return Ok(());
        };

        // Reject before asking for passenger details
        let seat = match parsed.and_then(|seat| ledger.seat_map().ensure_bookable(&seat).map(|_| seat)) {
            Ok(seat) => seat,
            Err(err) => {
                writeln!(self.output, "{}", describe(&err))?;
                return Ok(());
            }
        };

        let Some(passport) = self.prompt_required("Passport number: ", "passport number")? else {
            return Ok(());
        };
        let Some(first_name) = self.prompt_required("First name: ", "first name")? else {
            return Ok(());
        };
        let Some(last_name) = self.prompt_required("Last name: ", "last name")? else {
            return Ok(());
        };

        let result = match PassengerDetails::new(passport, first_name, last_name) {
            Ok(passenger) => ledger.book(&seat, passenger).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(reference) => writeln!(
                self.output,
                "Seat {} has been successfully booked. Booking reference: {}",
                seat, reference
            )?,
            Err(err) => writeln!(self.output, "{}", describe(&err))?,
        }
        Ok(())
    }

    async fn free_seat(&mut self, ledger: &mut SeatLedger) -> anyhow::Result<()> {
        let Some(parsed) = self.prompt_seat("Enter the seat number to free (e.g., 1A, 3D): ")? else {
            return Ok(());
        };

        let seat = match parsed {
            Ok(seat) => seat,
            Err(err) => {
                writeln!(self.output, "{}", describe(&err))?;
                return Ok(());
            }
        };

        match ledger.free(&seat).await {
            Ok(_) => writeln!(self.output, "Seat {} has been freed and is now available.", seat)?,
            Err(err) => writeln!(self.output, "{}", describe(&err))?,
        }
        Ok(())
    }

    fn show_booking_status(&mut self, ledger: &SeatLedger) -> anyhow::Result<()> {
        let windows = RowWindow::all(ledger.layout());
        let back = windows.len() + 1;

        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Select rows to display (10 rows at a time):")?;
            for (i, window) in windows.iter().enumerate() {
                writeln!(self.output, "{}. {}", i + 1, window)?;
            }
            writeln!(self.output, "{}. Return to main menu", back)?;

            let Some(line) = self.prompt(&format!("Enter your choice (1-{}): ", back))? else {
                return Ok(());
            };

            let choice = match line.parse::<usize>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.output, "Invalid input. Please enter a number between 1 and {}.", back)?;
                    continue;
                }
            };

            if choice == back {
                return Ok(());
            }
            match choice.checked_sub(1).and_then(|i| windows.get(i)) {
                Some(window) => {
                    writeln!(self.output)?;
                    write!(self.output, "{}", ledger.render(*window))?;
                }
                None => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please select a number between 1 and {}.",
                        back
                    )?;
                }
            }
        }
    }
}
