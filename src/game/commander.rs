//! Commander damage, elimination and win detection

use crate::core::{CardId, PlayerId, LETHAL_COMMANDER_DAMAGE};
use crate::game::GameState;
use crate::Result;

impl GameState {
    /// Record combat damage from a commander
    ///
    /// Commander damage is also life loss. Either 21 from one source or a
    /// life total of zero or less eliminates the player. Damage to an
    /// already eliminated player is ignored.
    pub fn update_commander_damage(
        &mut self,
        player_id: PlayerId,
        source_id: CardId,
        amount: i32,
        source_name: &str,
    ) -> Result<()> {
        let attacker = self
            .players
            .iter()
            .find(|p| p.owns_commander(source_id))
            .map(|p| p.name.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let player = self.get_player_mut(player_id)?;
        if player.eliminated {
            return Ok(());
        }
        let total = player.take_commander_damage(source_id, amount);
        player.life = player.life.saturating_sub(amount);
        let life = player.life;
        let message = format!("(CMDdmg:{attacker}{{{source_name}}}→{}:{total})", player.name);
        self.log.push(message);

        let mut newly_eliminated = false;
        if total >= LETHAL_COMMANDER_DAMAGE {
            self.eliminate(
                player_id,
                &format!("{LETHAL_COMMANDER_DAMAGE}+ Commander Damage from {source_name}"),
            )?;
            newly_eliminated = true;
        }
        if life <= 0 && !newly_eliminated {
            self.eliminate(player_id, "Life 0")?;
            newly_eliminated = true;
        }

        if newly_eliminated {
            self.check_winner();
        }
        Ok(())
    }

    /// Mark a player eliminated; a second call for the same player is silent
    pub(crate) fn eliminate(&mut self, player_id: PlayerId, reason: &str) -> Result<()> {
        let player = self.get_player_mut(player_id)?;
        if player.eliminated {
            return Ok(());
        }
        player.eliminated = true;
        let message = format!("{} has been eliminated ({reason}).", player.name);
        log::debug!("eliminated player {player_id}: {reason}");
        self.log.push(message);
        Ok(())
    }

    /// Record the last player standing as the winner
    ///
    /// Only evaluated while a game is running, and only once per game.
    pub fn check_winner(&mut self) {
        if !self.game_started || self.winner.is_some() {
            return;
        }
        let (id, message) = {
            let mut alive = self.living_players();
            let (Some(last), None) = (alive.next(), alive.next()) else {
                return;
            };
            (last.id, format!("GAME OVER! Winner: {}", last.name))
        };
        self.winner = Some(id);
        self.log.push(message);
    }
}
