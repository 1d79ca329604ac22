use ndarray::Array2;

use crate::*;

/// The cell colors last confirmed by the server, always rectangular.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridSnapshot {
    cells: Array2<CellColor>,
}

impl GridSnapshot {
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn color_at(&self, pos: CellPos) -> Option<&str> {
        self.cells.get(pos).map(String::as_str)
    }

    pub fn validate_pos(&self, pos: CellPos) -> Result<CellPos, GridError> {
        if pos.0 < self.rows() && pos.1 < self.cols() {
            Ok(pos)
        } else {
            Err(GridError::InvalidCoords)
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = impl Iterator<Item = &str>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.into_iter().map(String::as_str))
    }
}

impl TryFrom<GridPayload> for GridSnapshot {
    type Error = GridError;

    fn try_from(payload: GridPayload) -> Result<Self, Self::Error> {
        let rows = payload.len();
        let cols = payload.first().map_or(0, Vec::len);
        if payload.iter().any(|row| row.len() != cols) {
            return Err(GridError::InvalidShape);
        }

        let cells = Array2::from_shape_vec((rows, cols), payload.into_iter().flatten().collect())
            .map_err(|_| GridError::InvalidShape)?;
        Ok(Self { cells })
    }
}

/// Keeps the local grid in line with the server and turns clicks into edits.
///
/// The snapshot is only ever replaced as a whole by a server reply, nothing here paints
/// a color the server has not confirmed.
#[derive(Debug, Default)]
pub struct GridSyncEngine {
    snapshot: GridSnapshot,
    pending: Option<PendingEdit>,
    issued: u64,
    applied: u64,
}

impl GridSyncEngine {
    pub fn snapshot(&self) -> &GridSnapshot {
        &self.snapshot
    }

    pub fn pending(&self) -> Option<&PendingEdit> {
        self.pending.as_ref()
    }

    pub fn load_grid(&mut self) -> Call {
        self.issued += 1;
        log::debug!("grid load #{}", self.issued);
        Call::LoadGrid { seq: self.issued }
    }

    pub fn refresh(&mut self, view: &mut impl ViewPort) -> Call {
        view.clear_grid();
        self.load_grid()
    }

    /// Applies the reply to load `seq`. Replies older than the last applied one are dropped.
    pub fn apply_grid(
        &mut self,
        seq: u64,
        result: BackendResult<GridSnapshot>,
        view: &mut impl ViewPort,
    ) -> BackendResult<()> {
        if seq < self.applied {
            log::trace!("dropping grid reply #{} (have #{})", seq, self.applied);
            return Ok(());
        }

        match result {
            Ok(snapshot) => {
                log::debug!(
                    "grid #{}: {}x{}",
                    seq,
                    snapshot.rows(),
                    snapshot.cols()
                );
                self.applied = seq;
                self.snapshot = snapshot;
                view.render_grid(&self.snapshot);
                Ok(())
            }
            Err(err) => {
                // a refresh may have cleared the display already
                view.render_grid(&self.snapshot);
                Err(err)
            }
        }
    }

    pub fn select_cell(&mut self, pos: CellPos) -> Result<(), LocalValidationError> {
        let pos = self
            .snapshot
            .validate_pos(pos)
            .map_err(|_| LocalValidationError::OutOfBounds {
                row: pos.0,
                col: pos.1,
            })?;
        log::debug!("selected cell {:?}", pos);
        self.pending = Some(PendingEdit { pos });
        Ok(())
    }

    /// Bundles the pending cell with `color` for `uid`. Nothing is consumed while pixel
    /// edits are refused.
    pub fn submit_edit<S: Scheduler>(
        &mut self,
        color: CellColor,
        uid: Uid,
        cooldowns: &CooldownController<S>,
    ) -> Result<Call, LocalValidationError> {
        cooldowns.check_pixel_edit()?;
        let PendingEdit { pos: (row, col) } = self
            .pending
            .take()
            .ok_or(LocalValidationError::NoCellSelected)?;

        Ok(Call::SetPixel(PixelEdit {
            uid,
            row,
            col,
            color,
        }))
    }
}
