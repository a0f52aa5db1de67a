//! Interactive menu loop.
//!
//! The session owns the lot collection and the config. It reads selections
//! line by line from any `BufRead` and renders to any `Write`, saving after
//! every successful mutation.

use crate::codec;
use crate::config::Config;
use crate::error::{Rejection, Result};
use crate::store::LotCollection;
use crate::table::format_table;
use log::debug;
use std::io::{BufRead, Write};

/// A menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Show,
    Reserve,
    Cancel,
    Reset,
    Exit,
    Invalid,
}

impl MenuChoice {
    /// Maps trimmed user input to a selection.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MenuChoice::Show,
            "2" => MenuChoice::Reserve,
            "3" => MenuChoice::Cancel,
            "4" => MenuChoice::Reset,
            "5" => MenuChoice::Exit,
            _ => MenuChoice::Invalid,
        }
    }
}

/// Parses a 1-based lot number.
///
/// Returns `None` unless the trimmed input is a non-empty run of ASCII digits.
/// Numbers too large to represent saturate, so they are still rejected as out
/// of range rather than as malformed input.
pub fn parse_lot_number(input: &str) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(trimmed.parse().unwrap_or(usize::MAX))
}

/// One interactive session over a data file.
pub struct Session<R, W> {
    config: Config,
    lots: LotCollection,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Loads the data file named by `config` and prepares the session.
    pub fn start(config: Config, input: R, output: W) -> Result<Self> {
        let lots = codec::load(&config.data_path)?;
        Ok(Session {
            config,
            lots,
            input,
            output,
        })
    }

    /// Current in-memory state.
    pub fn lots(&self) -> &LotCollection {
        &self.lots
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// Only I/O failures (writing the data file or the terminal) are returned
    /// as errors; bad selections are reported and the menu is shown again.
    pub fn run(&mut self) -> Result<()> {
        self.print_banner()?;

        loop {
            writeln!(self.output, "\n======== DISPONIBILIDAD ACTUAL ========")?;
            writeln!(self.output, "{}", format_table(&self.lots))?;
            self.print_menu()?;

            let choice = match self.prompt("Seleccione una opción: ")? {
                Some(line) => MenuChoice::parse(&line),
                None => {
                    debug!("Input closed, ending session");
                    MenuChoice::Exit
                }
            };

            match choice {
                MenuChoice::Show => {
                    writeln!(self.output, "\nInformación actualizada mostrada arriba.\n")?;
                }
                MenuChoice::Reserve => self.reserve()?,
                MenuChoice::Cancel => self.cancel()?,
                MenuChoice::Reset => self.reset()?,
                MenuChoice::Exit => {
                    writeln!(self.output, "\nSaliendo... ¡Gracias por usar el sistema!\n")?;
                    self.output.flush()?;
                    return Ok(());
                }
                MenuChoice::Invalid => {
                    writeln!(self.output, "\nOpción inválida. Intente nuevamente.\n")?;
                }
            }
        }
    }

    fn reserve(&mut self) -> Result<()> {
        let Some(number) = self.prompt_lot_number("reservar")? else {
            return Ok(());
        };

        let outcome = match number.checked_sub(1) {
            Some(index) => self
                .lots
                .try_reserve(index)
                .map(|lot| (lot.name.clone(), lot.free_spaces())),
            None => Err(Rejection::InvalidLotNumber {
                number,
                len: self.lots.len(),
            }),
        };

        match outcome {
            Ok((name, free)) => {
                codec::save(&self.config.data_path, &self.lots)?;
                writeln!(
                    self.output,
                    "\nReserva confirmada en {} ({} libres).\n",
                    name, free
                )?;
            }
            Err(rejection) => {
                writeln!(self.output, "\nNo se pudo reservar: {}.\n", rejection)?;
            }
        }
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        let Some(number) = self.prompt_lot_number("cancelar")? else {
            return Ok(());
        };

        let outcome = match number.checked_sub(1) {
            Some(index) => self.lots.try_cancel(index).map(|lot| lot.name.clone()),
            None => Err(Rejection::InvalidLotNumber {
                number,
                len: self.lots.len(),
            }),
        };

        match outcome {
            Ok(name) => {
                codec::save(&self.config.data_path, &self.lots)?;
                writeln!(self.output, "\nReserva cancelada correctamente en {}.\n", name)?;
            }
            Err(rejection) => {
                writeln!(self.output, "\nNo se pudo cancelar: {}.\n", rejection)?;
            }
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.lots = LotCollection::reset();
        codec::save(&self.config.data_path, &self.lots)?;
        writeln!(
            self.output,
            "\nEl sistema se ha reiniciado a su estado original.\n"
        )?;
        Ok(())
    }

    /// Asks for a lot number. Reports malformed input and returns `None`.
    fn prompt_lot_number(&mut self, action: &str) -> Result<Option<usize>> {
        let prompt = format!("\nIngrese el número del parqueo para {}: ", action);
        let number = self
            .prompt(&prompt)?
            .as_deref()
            .and_then(parse_lot_number);

        if number.is_none() {
            writeln!(
                self.output,
                "\nEntrada inválida (debe ser un número de la tabla).\n"
            )?;
        }
        Ok(number)
    }

    /// Writes `text` and reads one line. Returns `None` at end of input.
    ///
    /// Bytes that are not valid UTF-8 are replaced, so they reach the menu as
    /// unrecognised input instead of failing the session.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    fn print_banner(&mut self) -> Result<()> {
        writeln!(self.output, "\n======== SISTEMA DE PARQUEOS ========")?;
        writeln!(
            self.output,
            "Este sistema permite: ver disponibilidad, reservar y cancelar un espacio."
        )?;
        writeln!(self.output, "Cómo usar:")?;
        writeln!(self.output, "  1) Revise la tabla de disponibilidad.")?;
        writeln!(self.output, "  2) Elija una opción del menú (1-5).")?;
        writeln!(self.output, "  3) Siga las indicaciones en pantalla.\n")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n======== MENÚ PRINCIPAL ========\n")?;
        writeln!(self.output, "1) Ver disponibilidad")?;
        writeln!(self.output, "2) Reservar un espacio")?;
        writeln!(self.output, "3) Cancelar una reserva")?;
        writeln!(self.output, "4) Reiniciar sistema (estado por defecto)")?;
        writeln!(self.output, "5) Salir\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lot::Lot;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_session(dir: &TempDir, input: &str) -> (LotCollection, String) {
        let config = Config::new(dir.path().join("parqueos.csv"));
        let mut output = Vec::new();
        let mut session = Session::start(config, Cursor::new(input), &mut output).unwrap();
        session.run().unwrap();
        let lots = session.lots().clone();
        drop(session);
        (lots, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(" 1 "), MenuChoice::Show);
        assert_eq!(MenuChoice::parse("2"), MenuChoice::Reserve);
        assert_eq!(MenuChoice::parse("3"), MenuChoice::Cancel);
        assert_eq!(MenuChoice::parse("4"), MenuChoice::Reset);
        assert_eq!(MenuChoice::parse("5"), MenuChoice::Exit);
        assert_eq!(MenuChoice::parse("6"), MenuChoice::Invalid);
        assert_eq!(MenuChoice::parse("salir"), MenuChoice::Invalid);
    }

    #[test]
    fn test_parse_lot_number() {
        assert_eq!(parse_lot_number("1"), Some(1));
        assert_eq!(parse_lot_number(" 3 \n"), Some(3));
        assert_eq!(parse_lot_number("0"), Some(0));
        assert_eq!(parse_lot_number("99999999999999999999999"), Some(usize::MAX));
        assert_eq!(parse_lot_number(""), None);
        assert_eq!(parse_lot_number("-1"), None);
        assert_eq!(parse_lot_number("+1"), None);
        assert_eq!(parse_lot_number("dos"), None);
    }

    #[test]
    fn test_exit_without_changes_does_not_write_file() {
        let dir = TempDir::new().unwrap();
        let (lots, output) = run_session(&dir, "5\n");

        assert_eq!(lots, LotCollection::default_lots());
        assert!(output.contains("Gracias por usar el sistema"));
        assert!(!dir.path().join("parqueos.csv").exists());
    }

    #[test]
    fn test_reserve_saves_new_state() {
        let dir = TempDir::new().unwrap();
        let (lots, output) = run_session(&dir, "2\n1\n5\n");

        assert_eq!(lots.get(0), Some(&Lot::new("Parqueo A", 5, 3)));
        assert!(output.contains("Reserva confirmada en Parqueo A (2 libres)"));

        let saved = fs::read_to_string(dir.path().join("parqueos.csv")).unwrap();
        assert_eq!(saved, "Parqueo A,5,3\nParqueo B,3,3\nEl Hoyo,4,1\nPuerta B,6,4\n");
    }

    #[test]
    fn test_reserve_full_lot_reports_and_skips_save() {
        let dir = TempDir::new().unwrap();
        let (lots, output) = run_session(&dir, "2\n2\n5\n");

        assert_eq!(lots, LotCollection::default_lots());
        assert!(output.contains("No se pudo reservar: Parqueo B no tiene espacios libres"));
        assert!(!dir.path().join("parqueos.csv").exists());
    }

    #[test]
    fn test_lot_number_zero_and_out_of_range_are_invalid_index() {
        let dir = TempDir::new().unwrap();
        let (lots, output) = run_session(&dir, "2\n0\n3\n9\n5\n");

        assert_eq!(lots, LotCollection::default_lots());
        assert!(output.contains("No se pudo reservar: índice inválido, no existe el parqueo 0 (hay 4)"));
        assert!(output.contains("No se pudo cancelar: índice inválido, no existe el parqueo 9 (hay 4)"));
    }

    #[test]
    fn test_non_numeric_lot_number_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_session(&dir, "3\nuno\n5\n");
        assert!(output.contains("Entrada inválida"));
    }

    #[test]
    fn test_cancel_then_cancel_empty_lot() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("parqueos.csv"), "Unico,2,1\n").unwrap();

        let (lots, output) = run_session(&dir, "3\n1\n3\n1\n5\n");

        assert_eq!(lots.as_slice(), &[Lot::new("Unico", 2, 0)]);
        assert!(output.contains("Reserva cancelada correctamente en Unico"));
        assert!(output.contains("No se pudo cancelar: Unico no tiene reservas para cancelar"));

        let saved = fs::read_to_string(dir.path().join("parqueos.csv")).unwrap();
        assert_eq!(saved, "Unico,2,0\n");
    }

    #[test]
    fn test_reset_restores_defaults_and_saves() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("parqueos.csv"), "Otro,9,9\n").unwrap();

        let (lots, output) = run_session(&dir, "4\n5\n");

        assert_eq!(lots, LotCollection::default_lots());
        assert!(output.contains("reiniciado a su estado original"));
        let saved = fs::read_to_string(dir.path().join("parqueos.csv")).unwrap();
        assert_eq!(saved, "Parqueo A,5,2\nParqueo B,3,3\nEl Hoyo,4,1\nPuerta B,6,4\n");
    }

    #[test]
    fn test_invalid_option_redisplays_menu() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_session(&dir, "7\n1\n5\n");

        assert!(output.contains("Opción inválida"));
        assert!(output.contains("Información actualizada"));
        assert_eq!(output.matches("MENÚ PRINCIPAL").count(), 3);
    }

    #[test]
    fn test_non_utf8_menu_selection_is_invalid_option() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path().join("parqueos.csv"));
        let mut output = Vec::new();

        let mut session =
            Session::start(config, Cursor::new(&b"\xff\n5\n"[..]), &mut output).unwrap();
        session.run().unwrap();
        drop(session);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Opción inválida"));
        assert!(output.contains("Gracias por usar el sistema"));
    }

    #[test]
    fn test_non_utf8_lot_number_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let config = Config::new(dir.path().join("parqueos.csv"));
        let mut output = Vec::new();

        let mut session =
            Session::start(config, Cursor::new(&b"2\n\xfe\xff\n5\n"[..]), &mut output).unwrap();
        session.run().unwrap();
        let lots = session.lots().clone();
        drop(session);

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Entrada inválida"));
        assert_eq!(lots, LotCollection::default_lots());
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_session(&dir, "2\n");

        assert!(output.contains("Entrada inválida"));
        assert!(output.contains("Gracias por usar el sistema"));
    }
}
