//! Command enum covering the Helix command vocabulary
//!
//! Commands are abstract identifiers. The keymap only stores them; what a
//! command *does* is decided by the host through the
//! [`CommandRegistry`](super::CommandRegistry). Names match Helix's
//! `[keys]` config so existing configs load unchanged.

use std::fmt;
use std::str::FromStr;

use super::mode::Mode;

macro_rules! helix_commands {
    ($($variant:ident => $name:literal, $doc:literal;)+) => {
        /// Every command a binding can refer to
        ///
        /// Generated from one table so the enum, its config names and its
        /// descriptions cannot drift apart.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Command {
            $(#[doc = $doc] $variant,)+
        }

        impl Command {
            /// Every command, in declaration order
            pub const ALL: &'static [Command] = &[$(Command::$variant,)+];

            /// The snake_case name used in config files
            pub const fn name(self) -> &'static str {
                match self {
                    $(Command::$variant => $name,)+
                }
            }

            /// Human-readable description (for overlays and listings)
            pub const fn description(self) -> &'static str {
                match self {
                    $(Command::$variant => $doc,)+
                }
            }

            fn from_name(name: &str) -> Option<Command> {
                match name {
                    $($name => Some(Command::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

helix_commands! {
    // Movement
    MoveCharLeft => "move_char_left", "Move left";
    MoveCharRight => "move_char_right", "Move right";
    MoveLineUp => "move_line_up", "Move up";
    MoveLineDown => "move_line_down", "Move down";
    MoveVisualLineUp => "move_visual_line_up", "Move up by visual line";
    MoveVisualLineDown => "move_visual_line_down", "Move down by visual line";
    ExtendCharLeft => "extend_char_left", "Extend left";
    ExtendCharRight => "extend_char_right", "Extend right";
    ExtendLineUp => "extend_line_up", "Extend up";
    ExtendLineDown => "extend_line_down", "Extend down";
    ExtendVisualLineUp => "extend_visual_line_up", "Extend up by visual line";
    ExtendVisualLineDown => "extend_visual_line_down", "Extend down by visual line";
    CopySelectionOnNextLine => "copy_selection_on_next_line", "Copy selection on next line";
    CopySelectionOnPrevLine => "copy_selection_on_prev_line", "Copy selection on previous line";
    MoveNextWordStart => "move_next_word_start", "Move to start of next word";
    MovePrevWordStart => "move_prev_word_start", "Move to start of previous word";
    MoveNextWordEnd => "move_next_word_end", "Move to end of next word";
    MovePrevWordEnd => "move_prev_word_end", "Move to end of previous word";
    MoveNextLongWordStart => "move_next_long_word_start", "Move to start of next long word";
    MovePrevLongWordStart => "move_prev_long_word_start", "Move to start of previous long word";
    MoveNextLongWordEnd => "move_next_long_word_end", "Move to end of next long word";
    MovePrevLongWordEnd => "move_prev_long_word_end", "Move to end of previous long word";
    MoveNextSubWordStart => "move_next_sub_word_start", "Move to start of next sub word";
    MovePrevSubWordStart => "move_prev_sub_word_start", "Move to start of previous sub word";
    MoveNextSubWordEnd => "move_next_sub_word_end", "Move to end of next sub word";
    MovePrevSubWordEnd => "move_prev_sub_word_end", "Move to end of previous sub word";
    ExtendNextWordStart => "extend_next_word_start", "Extend to start of next word";
    ExtendPrevWordStart => "extend_prev_word_start", "Extend to start of previous word";
    ExtendNextWordEnd => "extend_next_word_end", "Extend to end of next word";
    ExtendPrevWordEnd => "extend_prev_word_end", "Extend to end of previous word";
    ExtendNextLongWordStart => "extend_next_long_word_start", "Extend to start of next long word";
    ExtendPrevLongWordStart => "extend_prev_long_word_start", "Extend to start of previous long word";
    ExtendNextLongWordEnd => "extend_next_long_word_end", "Extend to end of next long word";
    ExtendPrevLongWordEnd => "extend_prev_long_word_end", "Extend to end of previous long word";
    MoveParentNodeEnd => "move_parent_node_end", "Move to end of the parent node";
    MoveParentNodeStart => "move_parent_node_start", "Move to beginning of the parent node";
    ExtendParentNodeEnd => "extend_parent_node_end", "Extend to end of the parent node";
    ExtendParentNodeStart => "extend_parent_node_start", "Extend to beginning of the parent node";

    // Find / till
    FindTillChar => "find_till_char", "Move till next occurrence of char";
    FindNextChar => "find_next_char", "Move to next occurrence of char";
    ExtendTillChar => "extend_till_char", "Extend till next occurrence of char";
    ExtendNextChar => "extend_next_char", "Extend to next occurrence of char";
    TillPrevChar => "till_prev_char", "Move till previous occurrence of char";
    FindPrevChar => "find_prev_char", "Move to previous occurrence of char";
    ExtendTillPrevChar => "extend_till_prev_char", "Extend till previous occurrence of char";
    ExtendPrevChar => "extend_prev_char", "Extend to previous occurrence of char";
    RepeatLastMotion => "repeat_last_motion", "Repeat last motion";

    // Changes to case and content
    Replace => "replace", "Replace with new char";
    SwitchCase => "switch_case", "Switch (toggle) case";
    SwitchToUppercase => "switch_to_uppercase", "Switch to uppercase";
    SwitchToLowercase => "switch_to_lowercase", "Switch to lowercase";

    // Scrolling
    PageUp => "page_up", "Move page up";
    PageDown => "page_down", "Move page down";
    HalfPageUp => "half_page_up", "Move half page up";
    HalfPageDown => "half_page_down", "Move half page down";
    PageCursorUp => "page_cursor_up", "Move page and cursor up";
    PageCursorDown => "page_cursor_down", "Move page and cursor down";
    PageCursorHalfUp => "page_cursor_half_up", "Move page and cursor half up";
    PageCursorHalfDown => "page_cursor_half_down", "Move page and cursor half down";
    ScrollUp => "scroll_up", "Scroll view up";
    ScrollDown => "scroll_down", "Scroll view down";
    AlignViewMiddle => "align_view_middle", "Align view middle";
    AlignViewTop => "align_view_top", "Align view top";
    AlignViewCenter => "align_view_center", "Align view center";
    AlignViewBottom => "align_view_bottom", "Align view bottom";

    // Selections
    SelectAll => "select_all", "Select whole document";
    SelectRegex => "select_regex", "Select all regex matches inside selections";
    SplitSelection => "split_selection", "Split selections on regex matches";
    SplitSelectionOnNewline => "split_selection_on_newline", "Split selection on newlines";
    MergeSelections => "merge_selections", "Merge selections";
    MergeConsecutiveSelections => "merge_consecutive_selections", "Merge consecutive selections";
    CollapseSelection => "collapse_selection", "Collapse selection into single cursor";
    FlipSelections => "flip_selections", "Flip selection cursor and anchor";
    EnsureSelectionsForward => "ensure_selections_forward", "Ensure all selections face forward";
    KeepSelections => "keep_selections", "Keep selections matching regex";
    RemoveSelections => "remove_selections", "Remove selections matching regex";
    AlignSelections => "align_selections", "Align selections in column";
    KeepPrimarySelection => "keep_primary_selection", "Keep primary selection";
    RemovePrimarySelection => "remove_primary_selection", "Remove primary selection";
    TrimSelections => "trim_selections", "Trim whitespace from selections";
    RotateSelectionsForward => "rotate_selections_forward", "Rotate selections forward";
    RotateSelectionsBackward => "rotate_selections_backward", "Rotate selections backward";
    RotateSelectionContentsForward => "rotate_selection_contents_forward", "Rotate selection contents forward";
    RotateSelectionContentsBackward => "rotate_selection_contents_backward", "Rotate selections contents backward";
    ReverseSelectionContents => "reverse_selection_contents", "Reverse selections contents";
    ExpandSelection => "expand_selection", "Expand selection to parent syntax node";
    ShrinkSelection => "shrink_selection", "Shrink selection to previously expanded syntax node";
    SelectNextSibling => "select_next_sibling", "Select next sibling in the syntax tree";
    SelectPrevSibling => "select_prev_sibling", "Select previous sibling in the syntax tree";
    SelectAllSiblings => "select_all_siblings", "Select all siblings of the current node";
    SelectAllChildren => "select_all_children", "Select all children of the current node";
    SaveSelection => "save_selection", "Save current selection to jumplist";
    JumpForward => "jump_forward", "Jump forward on jumplist";
    JumpBackward => "jump_backward", "Jump backward on jumplist";

    // Search
    Search => "search", "Search for regex pattern";
    Rsearch => "rsearch", "Reverse search for regex pattern";
    SearchNext => "search_next", "Select next search match";
    SearchPrev => "search_prev", "Select previous search match";
    ExtendSearchNext => "extend_search_next", "Add next search match to selection";
    ExtendSearchPrev => "extend_search_prev", "Add previous search match to selection";
    SearchSelection => "search_selection", "Use current selection as search pattern";
    SearchSelectionDetectWordBoundaries => "search_selection_detect_word_boundaries", "Use current selection as the search pattern, automatically wrapping with `\\b` on word boundaries";
    MakeSearchWordBounded => "make_search_word_bounded", "Modify current search to make it word bounded";
    GlobalSearch => "global_search", "Global search in workspace folder";

    // Lines
    ExtendLine => "extend_line", "Select current line, if already selected, extend to another line based on the anchor";
    ExtendLineAbove => "extend_line_above", "Select current line, if already selected, extend to previous line";
    ExtendLineBelow => "extend_line_below", "Select current line, if already selected, extend to next line";
    SelectLineAbove => "select_line_above", "Select current line, if already selected, extend or shrink line above based on the anchor";
    SelectLineBelow => "select_line_below", "Select current line, if already selected, extend or shrink line below based on the anchor";
    ExtendToLineBounds => "extend_to_line_bounds", "Extend selection to line bounds";
    ShrinkToLineBounds => "shrink_to_line_bounds", "Shrink selection to line bounds";

    // Pickers
    CommandMode => "command_mode", "Enter command mode";
    FilePicker => "file_picker", "Open file picker";
    FilePickerInCurrentBufferDirectory => "file_picker_in_current_buffer_directory", "Open file picker at current buffer's directory";
    FilePickerInCurrentDirectory => "file_picker_in_current_directory", "Open file picker at current working directory";
    CodeAction => "code_action", "Perform code action";
    BufferPicker => "buffer_picker", "Open buffer picker";
    JumplistPicker => "jumplist_picker", "Open jumplist picker";
    SymbolPicker => "symbol_picker", "Open symbol picker";
    ChangedFilePicker => "changed_file_picker", "Open changed file picker";
    SelectReferencesToSymbolUnderCursor => "select_references_to_symbol_under_cursor", "Select symbol references";
    WorkspaceSymbolPicker => "workspace_symbol_picker", "Open workspace symbol picker";
    DiagnosticsPicker => "diagnostics_picker", "Open diagnostic picker";
    LastPicker => "last_picker", "Open last picker";
    CommandPalette => "command_palette", "Open command palette";

    // Modes
    NormalMode => "normal_mode", "Enter normal mode";
    SelectMode => "select_mode", "Enter selection extend mode";
    ExitSelectMode => "exit_select_mode", "Exit selection mode";
    InsertMode => "insert_mode", "Insert before selection";
    AppendMode => "append_mode", "Append after selection";
    InsertAtLineStart => "insert_at_line_start", "Insert at start of line";
    InsertAtLineEnd => "insert_at_line_end", "Insert at end of line";
    OpenBelow => "open_below", "Open new line below selection";
    OpenAbove => "open_above", "Open new line above selection";
    RepeatInsert => "repeat_insert", "Repeat last insert";

    // Goto
    GotoDefinition => "goto_definition", "Goto definition";
    GotoDeclaration => "goto_declaration", "Goto declaration";
    GotoTypeDefinition => "goto_type_definition", "Goto type definition";
    GotoImplementation => "goto_implementation", "Goto implementation";
    GotoReference => "goto_reference", "Goto references";
    GotoFileStart => "goto_file_start", "Goto line number <n> else file start";
    GotoFileEnd => "goto_file_end", "Goto file end";
    GotoFile => "goto_file", "Goto files/URLs in selections";
    GotoFileHsplit => "goto_file_hsplit", "Goto files in selections (hsplit)";
    GotoFileVsplit => "goto_file_vsplit", "Goto files in selections (vsplit)";
    GotoWindowTop => "goto_window_top", "Goto window top";
    GotoWindowCenter => "goto_window_center", "Goto window center";
    GotoWindowBottom => "goto_window_bottom", "Goto window bottom";
    GotoLastAccessedFile => "goto_last_accessed_file", "Goto last accessed file";
    GotoLastModifiedFile => "goto_last_modified_file", "Goto last modified file";
    GotoLastModification => "goto_last_modification", "Goto last modification";
    GotoLine => "goto_line", "Goto line";
    GotoLastLine => "goto_last_line", "Goto last line";
    GotoFirstDiag => "goto_first_diag", "Goto first diagnostic";
    GotoLastDiag => "goto_last_diag", "Goto last diagnostic";
    GotoNextDiag => "goto_next_diag", "Goto next diagnostic";
    GotoPrevDiag => "goto_prev_diag", "Goto previous diagnostic";
    GotoNextChange => "goto_next_change", "Goto next change";
    GotoPrevChange => "goto_prev_change", "Goto previous change";
    GotoFirstChange => "goto_first_change", "Goto first change";
    GotoLastChange => "goto_last_change", "Goto last change";
    GotoLineStart => "goto_line_start", "Goto line start";
    GotoLineEnd => "goto_line_end", "Goto line end";
    GotoNextBuffer => "goto_next_buffer", "Goto next buffer";
    GotoPreviousBuffer => "goto_previous_buffer", "Goto previous buffer";
    GotoLineEndNewline => "goto_line_end_newline", "Goto newline at line end";
    GotoFirstNonwhitespace => "goto_first_nonwhitespace", "Goto first non-blank in line";
    GotoWord => "goto_word", "Jump to a two-character label";
    ExtendToWord => "extend_to_word", "Extend to a two-character label";
    ExtendToLineStart => "extend_to_line_start", "Extend to line start";
    ExtendToFirstNonwhitespace => "extend_to_first_nonwhitespace", "Extend to first non-blank in line";
    ExtendToLineEnd => "extend_to_line_end", "Extend to line end";
    ExtendToLineEndNewline => "extend_to_line_end_newline", "Extend to line end";
    GotoNextFunction => "goto_next_function", "Goto next function";
    GotoPrevFunction => "goto_prev_function", "Goto previous function";
    GotoNextClass => "goto_next_class", "Goto next type definition";
    GotoPrevClass => "goto_prev_class", "Goto previous type definition";
    GotoNextParameter => "goto_next_parameter", "Goto next parameter";
    GotoPrevParameter => "goto_prev_parameter", "Goto previous parameter";
    GotoNextComment => "goto_next_comment", "Goto next comment";
    GotoPrevComment => "goto_prev_comment", "Goto previous comment";
    GotoNextTest => "goto_next_test", "Goto next test";
    GotoPrevTest => "goto_prev_test", "Goto previous test";
    GotoNextEntry => "goto_next_entry", "Goto next pairing";
    GotoPrevEntry => "goto_prev_entry", "Goto previous pairing";
    GotoNextParagraph => "goto_next_paragraph", "Goto next paragraph";
    GotoPrevParagraph => "goto_prev_paragraph", "Goto previous paragraph";
    GotoNextTabstop => "goto_next_tabstop", "Goto next snippet placeholder";
    GotoPrevTabstop => "goto_prev_tabstop", "Goto previous snippet placeholder";

    // Insert-mode editing
    SignatureHelp => "signature_help", "Show signature help";
    SmartTab => "smart_tab", "Insert tab if all cursors have all whitespace to their left; otherwise, run a separate command";
    InsertTab => "insert_tab", "Insert tab char";
    InsertNewline => "insert_newline", "Insert newline char";
    DeleteCharBackward => "delete_char_backward", "Delete previous char";
    DeleteCharForward => "delete_char_forward", "Delete next char";
    DeleteWordBackward => "delete_word_backward", "Delete previous word";
    DeleteWordForward => "delete_word_forward", "Delete next word";
    KillToLineStart => "kill_to_line_start", "Delete till start of line";
    KillToLineEnd => "kill_to_line_end", "Delete till end of line";
    Completion => "completion", "Invoke completion popup";

    // Changes
    DeleteSelection => "delete_selection", "Delete selection";
    DeleteSelectionNoyank => "delete_selection_noyank", "Delete selection without yanking";
    ChangeSelection => "change_selection", "Change selection";
    ChangeSelectionNoyank => "change_selection_noyank", "Change selection without yanking";
    AddNewlineAbove => "add_newline_above", "Add newline above";
    AddNewlineBelow => "add_newline_below", "Add newline below";
    Indent => "indent", "Indent selection";
    Unindent => "unindent", "Unindent selection";
    FormatSelections => "format_selections", "Format selection";
    JoinSelections => "join_selections", "Join lines inside selection";
    JoinSelectionsSpace => "join_selections_space", "Join lines inside selection and select spaces";
    ToggleComments => "toggle_comments", "Comment/uncomment selections";
    ToggleLineComments => "toggle_line_comments", "Line comment/uncomment selections";
    ToggleBlockComments => "toggle_block_comments", "Block comment/uncomment selections";
    Increment => "increment", "Increment item under cursor";
    Decrement => "decrement", "Decrement item under cursor";

    // History
    Undo => "undo", "Undo change";
    Redo => "redo", "Redo change";
    Earlier => "earlier", "Move backward in history";
    Later => "later", "Move forward in history";
    CommitUndoCheckpoint => "commit_undo_checkpoint", "Commit changes to new checkpoint";

    // Registers and clipboard
    Yank => "yank", "Yank selection";
    YankToClipboard => "yank_to_clipboard", "Yank selections to clipboard";
    YankToPrimaryClipboard => "yank_to_primary_clipboard", "Yank selections to primary clipboard";
    YankJoined => "yank_joined", "Join and yank selections";
    YankJoinedToClipboard => "yank_joined_to_clipboard", "Join and yank selections to clipboard";
    YankMainSelectionToClipboard => "yank_main_selection_to_clipboard", "Yank main selection to clipboard";
    YankJoinedToPrimaryClipboard => "yank_joined_to_primary_clipboard", "Join and yank selections to primary clipboard";
    YankMainSelectionToPrimaryClipboard => "yank_main_selection_to_primary_clipboard", "Yank main selection to primary clipboard";
    ReplaceWithYanked => "replace_with_yanked", "Replace with yanked text";
    ReplaceSelectionsWithClipboard => "replace_selections_with_clipboard", "Replace selections by clipboard content";
    ReplaceSelectionsWithPrimaryClipboard => "replace_selections_with_primary_clipboard", "Replace selections by primary clipboard";
    PasteAfter => "paste_after", "Paste after selection";
    PasteBefore => "paste_before", "Paste before selection";
    PasteClipboardAfter => "paste_clipboard_after", "Paste clipboard after selections";
    PasteClipboardBefore => "paste_clipboard_before", "Paste clipboard before selections";
    PastePrimaryClipboardAfter => "paste_primary_clipboard_after", "Paste primary clipboard after selections";
    PastePrimaryClipboardBefore => "paste_primary_clipboard_before", "Paste primary clipboard before selections";
    SelectRegister => "select_register", "Select register";
    InsertRegister => "insert_register", "Insert register";

    // LSP
    Hover => "hover", "Show docs for item under cursor";
    RenameSymbol => "rename_symbol", "Rename symbol";

    // Windows
    JumpViewRight => "jump_view_right", "Jump to right split";
    JumpViewLeft => "jump_view_left", "Jump to left split";
    JumpViewUp => "jump_view_up", "Jump to split above";
    JumpViewDown => "jump_view_down", "Jump to split below";
    SwapViewRight => "swap_view_right", "Swap with right split";
    SwapViewLeft => "swap_view_left", "Swap with left split";
    SwapViewUp => "swap_view_up", "Swap with split above";
    SwapViewDown => "swap_view_down", "Swap with split below";
    TransposeView => "transpose_view", "Transpose splits";
    RotateView => "rotate_view", "Goto next window";
    RotateViewReverse => "rotate_view_reverse", "Goto previous window";
    Hsplit => "hsplit", "Horizontal bottom split";
    HsplitNew => "hsplit_new", "Horizontal bottom split scratch buffer";
    Vsplit => "vsplit", "Vertical right split";
    VsplitNew => "vsplit_new", "Vertical right split scratch buffer";
    Wclose => "wclose", "Close window";
    Wonly => "wonly", "Close windows except current";

    // Text objects and surround
    MatchBrackets => "match_brackets", "Goto matching bracket";
    SurroundAdd => "surround_add", "Surround add";
    SurroundReplace => "surround_replace", "Surround replace";
    SurroundDelete => "surround_delete", "Surround delete";
    SelectTextobjectAround => "select_textobject_around", "Select around object";
    SelectTextobjectInner => "select_textobject_inner", "Select inside object";

    // Debugging
    DapLaunch => "dap_launch", "Launch debug target";
    DapRestart => "dap_restart", "Restart debugging session";
    DapToggleBreakpoint => "dap_toggle_breakpoint", "Toggle breakpoint";
    DapContinue => "dap_continue", "Continue program execution";
    DapPause => "dap_pause", "Pause program execution";
    DapStepIn => "dap_step_in", "Step in";
    DapStepOut => "dap_step_out", "Step out";
    DapNext => "dap_next", "Step to next";
    DapVariables => "dap_variables", "List variables";
    DapTerminate => "dap_terminate", "End debug session";
    DapEditCondition => "dap_edit_condition", "Edit breakpoint condition on current line";
    DapEditLog => "dap_edit_log", "Edit breakpoint log message on current line";
    DapSwitchThread => "dap_switch_thread", "Switch current thread";
    DapSwitchStackFrame => "dap_switch_stack_frame", "Switch stack frame";
    DapEnableExceptions => "dap_enable_exceptions", "Enable exception breakpoints";
    DapDisableExceptions => "dap_disable_exceptions", "Disable exception breakpoints";

    // Shell
    ShellPipe => "shell_pipe", "Pipe selections through shell command";
    ShellPipeTo => "shell_pipe_to", "Pipe selections into shell command ignoring output";
    ShellInsertOutput => "shell_insert_output", "Insert shell command output before selections";
    ShellAppendOutput => "shell_append_output", "Append shell command output after selections";
    ShellKeepPipe => "shell_keep_pipe", "Filter selections with shell predicate";
    Suspend => "suspend", "Suspend and return to shell";

    // Macros
    RecordMacro => "record_macro", "Record macro";
    ReplayMacro => "replay_macro", "Replay macro";

    NoOp => "no_op", "Do nothing";
}

impl Command {
    /// The mode this command leaves the editor in, if it changes mode
    ///
    /// The dispatcher applies the transition itself after the host handler
    /// runs, so mode state is only ever written through this path.
    pub const fn mode_transition(self) -> Option<Mode> {
        use Command::*;

        match self {
            NormalMode | ExitSelectMode => Some(Mode::Normal),
            InsertMode | AppendMode | InsertAtLineStart | InsertAtLineEnd | OpenBelow
            | OpenAbove | ChangeSelection | ChangeSelectionNoyank => Some(Mode::Insert),
            SelectMode => Some(Mode::Select),
            _ => None,
        }
    }

    /// Whether a repeat count multiplies this command
    ///
    /// Pure mode switches run once no matter the count.
    pub const fn is_repeatable(self) -> bool {
        !matches!(
            self,
            Command::NormalMode | Command::SelectMode | Command::ExitSelectMode | Command::NoOp
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A command name that is not part of the vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    /// Exact match after case normalization (`GOTO_FILE_START` works too)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::from_name(&s.trim().to_ascii_lowercase()).ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::from_str("goto_file_start"), Ok(Command::GotoFileStart));
        assert_eq!(Command::from_str("undo"), Ok(Command::Undo));
        assert_eq!(Command::from_str("MOVE_LINE_DOWN"), Ok(Command::MoveLineDown));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::from_str("not_a_real_command"),
            Err(UnknownCommand("not_a_real_command".to_string()))
        );
    }

    #[test]
    fn test_names_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for &command in Command::ALL {
            assert!(seen.insert(command.name()), "duplicate name {}", command.name());
            assert_eq!(command.name().parse(), Ok(command));
        }
    }

    #[test]
    fn test_mode_transitions() {
        assert_eq!(Command::InsertMode.mode_transition(), Some(Mode::Insert));
        assert_eq!(Command::OpenBelow.mode_transition(), Some(Mode::Insert));
        assert_eq!(Command::SelectMode.mode_transition(), Some(Mode::Select));
        assert_eq!(Command::ExitSelectMode.mode_transition(), Some(Mode::Normal));
        assert_eq!(Command::MoveLineDown.mode_transition(), None);
    }

    #[test]
    fn test_mode_switch_is_not_repeatable() {
        assert!(!Command::NormalMode.is_repeatable());
        assert!(Command::MoveCharLeft.is_repeatable());
    }
}
